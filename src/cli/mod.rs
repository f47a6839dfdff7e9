//! CLI module for the Quick Install launcher
//!
//! Provides a command-line interface for all launcher operations.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// Quick Install - download-and-run app launcher
#[derive(Parser, Debug)]
#[command(name = "quickinstall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the app catalog
    Catalog {
        #[command(subcommand)]
        command: commands::catalog::CatalogCommands,
    },

    /// Download an app's installer and run it
    Install(commands::install::InstallArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Interactive shell with history and completion
    Shell,
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;

    match cli.command {
        Commands::Catalog { command } => commands::catalog::run(command, format, quiet).await,
        Commands::Install(args) => commands::install::run(args, format, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
        Commands::Shell => shell::run().await,
    }
}
