use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pushgate-cli", version, about = "Pushgate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activity history recording and inspection
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Push timing decisions
    Push {
        #[command(subcommand)]
        action: commands::push::PushAction,
    },
    /// Recurring-window pattern inspection
    Pattern {
        #[command(subcommand)]
        action: commands::pattern::PatternAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Push { action } => commands::push::run(action),
        Commands::Pattern { action } => commands::pattern::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "pushgate-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
