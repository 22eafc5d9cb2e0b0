#![allow(warnings)]

use anyhow::Result;
use clap::Parser;
use log::info;

use guesthouse_cli::cli::commands::{guests_command, report_command, tui_command};
use guesthouse_cli::cli::commands::tui::TuiCommands;
use guesthouse_cli::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns the terminal, so logs go to a file (truncated per run).
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("guesthouse-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting guesthouse-cli");

    match cli.command {
        Some(Commands::Tui(args)) => tui_command(args).await?,
        Some(Commands::Guests(args)) => guests_command(args)?,
        Some(Commands::Report(args)) => report_command(args)?,
        None => tui_command(TuiCommands::default()).await?,
    }

    Ok(())
}
