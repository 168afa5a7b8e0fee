use anyhow::Result;
use clap::{Parser, Subcommand};
use coinboard::core::currency::Currency;
use coinboard::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for coinboard::AppCommand {
    fn from(cmd: Commands) -> coinboard::AppCommand {
        match cmd {
            Commands::Watch {
                currency,
                interval_ms,
            } => coinboard::AppCommand::Watch {
                currency,
                interval_ms,
            },
            Commands::Show { currency } => coinboard::AppCommand::Show { currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the live dashboard (default)
    Watch {
        /// Quote currency: usd, brl, eur, gbp or jpy
        #[arg(long)]
        currency: Option<Currency>,

        /// Refresh interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Fetch and display the market once
    Show {
        /// Quote currency: usd, brl, eur, gbp or jpy
        #[arg(long)]
        currency: Option<Currency>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Watch {
        currency: None,
        interval_ms: None,
    });
    let result = match command {
        Commands::Setup => coinboard::cli::setup::setup(),
        cmd => coinboard::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
