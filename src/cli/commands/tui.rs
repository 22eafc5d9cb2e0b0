use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::registry::Registry;
use crate::store::KvStore;

#[derive(Args, Default)]
pub struct TuiCommands {
    #[command(subcommand)]
    pub command: Option<TuiSubcommands>,
}

#[derive(Subcommand)]
pub enum TuiSubcommands {
    /// Launch the interactive terminal interface (default)
    Launch,
}

pub async fn tui_command(args: TuiCommands) -> Result<()> {
    match args.command {
        Some(TuiSubcommands::Launch) | None => {
            let config = Config::load()?;
            let registry = Registry::load(KvStore::open(KvStore::default_path()?));
            crate::tui::run(registry, config).await?;
        }
    }
    Ok(())
}
