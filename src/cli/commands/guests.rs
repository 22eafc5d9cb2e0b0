use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use is_terminal::IsTerminal;

use crate::registry::Registry;
use crate::report::stay::format_period;
use crate::store::KvStore;

#[derive(Args)]
pub struct GuestsCommands {
    #[command(subcommand)]
    pub command: GuestsSubcommands,
}

#[derive(Subcommand)]
pub enum GuestsSubcommands {
    /// List checked-in guests
    List,
    /// Remove all guests and report data
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub fn guests_command(args: GuestsCommands) -> Result<()> {
    match args.command {
        GuestsSubcommands::List => list_command(),
        GuestsSubcommands::Clear { force } => clear_command(force),
    }
}

fn list_command() -> Result<()> {
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let registry = Registry::load(KvStore::open(KvStore::default_path()?));
    if registry.guests().is_empty() {
        println!("{}", "No guests currently checked in.".yellow());
        return Ok(());
    }

    println!(
        "{:<24} {:<16} {:<11} {:<24} {:>7}",
        "NAME".green().bold(),
        "NATIONALITY".green().bold(),
        "BOOKING".green().bold(),
        "STAY".green().bold(),
        "PARTY".green().bold(),
    );
    for guest in registry.guests() {
        let (booking_id, stay, party) = match guest.current_booking() {
            Some(b) => (
                b.booking_id.clone(),
                format_period(b.check_in_date, b.number_of_nights),
                format!("{}+{}", b.number_of_guests.adults, b.number_of_guests.children),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        println!(
            "{:<24} {:<16} {:<11} {:<24} {:>7}",
            guest.full_name(),
            guest.nationality,
            booking_id.cyan(),
            stay,
            party,
        );
    }
    Ok(())
}

fn clear_command(force: bool) -> Result<()> {
    let mut registry = Registry::load(KvStore::open(KvStore::default_path()?));
    if registry.guests().is_empty() && registry.report_rows().is_empty() {
        println!("Registry is already empty.");
        return Ok(());
    }

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove {} guest(s) and all report data?",
                registry.guests().len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    registry.clear_all()?;
    println!("{}", "Registry cleared.".green());
    Ok(())
}
