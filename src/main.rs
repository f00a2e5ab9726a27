// Project Index Server
// Main CLI entry point

use clap::Parser;
use project_index_server::cli::{Cli, CliDispatcher};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = CliDispatcher::execute(cli).await {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
