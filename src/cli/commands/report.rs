use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::registry::Registry;
use crate::report::form::{render_form, FormOptions};
use crate::store::KvStore;

#[derive(Args)]
pub struct ReportCommands {
    #[command(subcommand)]
    pub command: ReportSubcommands,
}

#[derive(Subcommand)]
pub enum ReportSubcommands {
    /// Render the in-progress TM30 report rows to a printable HTML file
    Export {
        /// Output file path (default: TM30-<timestamp>.html in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn report_command(args: ReportCommands) -> Result<()> {
    match args.command {
        ReportSubcommands::Export { output } => export_command(output),
    }
}

fn export_command(output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let registry = Registry::load(KvStore::open(KvStore::default_path()?));

    if registry.report_rows().is_empty() {
        println!("{}", "No report rows to export. Open the TM30 screen in the TUI first.".yellow());
        return Ok(());
    }

    let options = FormOptions { pad_to_min_rows: config.settings.pad_report_rows };
    let html = render_form(registry.report_rows(), &registry.bookings_by_id(), options);

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!("TM30-{}.html", Local::now().format("%Y%m%d-%H%M%S")))
    });
    fs::write(&path, html).with_context(|| format!("Failed to write report: {:?}", path))?;
    println!("Report written to {}", path.display().to_string().green());
    Ok(())
}
