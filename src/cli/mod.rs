// CLI module for command-line interface

pub mod serve;
pub mod sync;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::utils::config::{Config, ConfigArgs};
use crate::utils::logging;

use self::serve::ServeCommand;
use self::sync::SyncCommand;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "project-index-server")]
#[command(about = "Local backend for the static template editor")]
#[command(long_about = r#"Local backend for the static template editor.

Serves the editor's static files and the endpoints it uses to upload images,
save generated project pages and keep projects.json in sync with the
projects/ directory. Intended for localhost use only.

Examples:
  project-index-server                          Serve the editor on 127.0.0.1:3000
  project-index-server serve --layout nested    Keep projects inside the editor directory
  project-index-server sync                     Reconcile projects.json once and exit
  project-index-server sync --json              Print the full reconcile report"#)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the editor and its API (default)
    Serve,

    /// Reconcile projects.json with the projects directory and exit
    Sync {
        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Load configuration, start logging and run the selected command
    pub async fn execute(cli: Cli) -> Result<()> {
        let config = Config::load(&cli.config).context("Failed to load configuration")?;
        logging::init(&config).context("Failed to initialize logging")?;
        logging::warn_if_exposed(&config);

        match cli.command.unwrap_or(Commands::Serve) {
            Commands::Serve => ServeCommand.run(config).await,
            Commands::Sync { json } => SyncCommand { json }.run(&config).await,
        }
    }
}
