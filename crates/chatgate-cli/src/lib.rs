//! ChatGate command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};

/// ChatGate - chat relay gateway
#[derive(Parser)]
#[command(name = "chatgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, env = "CHATGATE_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Serve(commands::serve::ServeArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve::run(cli.config, args).await,
        Commands::Version => {
            println!("chatgate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
