use super::commands::guests::GuestsCommands;
use super::commands::report::ReportCommands;
use super::commands::tui::TuiCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "guesthouse-cli")]
#[command(about = "A terminal interface for guest check-in and TM30 immigration reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal interface (default)
    Tui(TuiCommands),
    /// Guest registry management
    Guests(GuestsCommands),
    /// TM30 report tools
    Report(ReportCommands),
}
