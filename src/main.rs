//! Squadlab - Squad builder and accessory evaluator
//!
//! Loads character and item catalogs, filters the items a character may
//! equip, and sums the stat profile of an equipped loadout.

mod commands;
mod loadout;
mod report;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{Characters, Items, Stats, Tiers};
use settings::Settings;

/// Squad builder and accessory evaluator
#[derive(Parser)]
#[command(name = "squadlab")]
#[command(about = "Squad builder and accessory evaluator", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Character catalog, overrides the settings file
    #[arg(long, global = true)]
    characters: Option<PathBuf>,

    /// Item catalog, overrides the settings file
    #[arg(long, global = true)]
    items: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Evaluate a loadout file
    Stats(Stats),

    /// List items, filtered by character and selections
    Items(Items),

    /// Search the character roster
    Characters(Characters),

    /// Rank the item catalog into tiers
    Tiers(Tiers),
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level {level:?}"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut settings, source) = Settings::load(cli.config.as_deref());
    init_logging(&settings.logging.level)?;
    source.log();

    if let Some(path) = cli.characters {
        settings.data.characters = path;
    }
    if let Some(path) = cli.items {
        settings.data.items = path;
    }

    match cli.command {
        Command::Stats(cmd) => cmd.execute(&settings),
        Command::Items(cmd) => cmd.execute(&settings),
        Command::Characters(cmd) => cmd.execute(&settings),
        Command::Tiers(cmd) => cmd.execute(&settings),
    }
}
