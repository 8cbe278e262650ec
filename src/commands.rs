//! CLI subcommands

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use squadlab_core::StatKey;
use squadlab_game::{condition_options, effect_options, tier, Session};
use squadlab_integration::read_catalog;
use tracing::{info, warn};

use crate::loadout::Loadout;
use crate::report;
use crate::settings::Settings;

/// Load both catalogs into a fresh session
fn load_session(settings: &Settings) -> Result<Session> {
    let mut session = Session::new();
    session
        .apply_character_load(read_catalog(&settings.data.characters))
        .context("Failed to load characters")?;
    session
        .apply_item_load(read_catalog(&settings.data.items))
        .context("Failed to load items")?;
    Ok(session)
}

/// Evaluate a loadout and print its stat profile
#[derive(Parser, Debug)]
pub struct Stats {
    /// Loadout TOML file
    pub loadout: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Stats {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let loadout = Loadout::read(&self.loadout)?;
        let mut session = load_session(settings)?;
        loadout.apply(&mut session)?;

        let stats = session.stats();
        let mut out = io::stdout().lock();
        if self.json {
            serde_json::to_writer_pretty(&mut out, &stats)?;
            writeln!(out)?;
        } else {
            if let Some(character) = session.character() {
                writeln!(out, "{}", character.name)?;
            }
            for (i, item) in session.equipped.items() {
                writeln!(out, "  slot {}: {} (x{})", i + 1, item.name, item.multiplier)?;
            }
            writeln!(out)?;
            report::write_stats(&mut out, &stats, &settings.report)?;
        }
        Ok(())
    }
}

/// List the items a character can equip
#[derive(Parser, Debug)]
pub struct Items {
    /// Character id, code or name
    #[arg(short, long)]
    pub character: Option<String>,

    /// Stat name an effect must mention (repeatable)
    #[arg(short, long = "effect")]
    pub effects: Vec<String>,

    /// Condition tag the item must require (repeatable)
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Rarity label, e.g. "Awakened Gold" (repeatable)
    #[arg(short, long = "rarity")]
    pub rarities: Vec<String>,

    /// Print the available filter choices instead of the items
    #[arg(long)]
    pub options: bool,
}

impl Items {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        for effect in &self.effects {
            effect.parse::<StatKey>()?;
        }

        let mut session = load_session(settings)?;
        session.filters.effects = self.effects.into_iter().collect();
        session.filters.conditions = self.conditions.into_iter().collect();
        session.filters.rarities = self.rarities.into_iter().collect();
        if let Some(key) = &self.character {
            session
                .select_character(key)
                .with_context(|| format!("No character matches {key:?}"))?;
        } else if !session.filters.is_empty() {
            warn!("item filters apply only once --character is given");
        }

        let mut out = io::stdout().lock();
        if self.options {
            let effects: Vec<String> = effect_options().into_iter().map(String::from).collect();
            report::write_options(&mut out, "Effects", &effects)?;
            report::write_options(&mut out, "Rarities", &session.rarity_options())?;
            if let Some(character) = session.character() {
                let conditions: Vec<String> = condition_options(character).into_iter().collect();
                report::write_options(&mut out, "Conditions", &conditions)?;
            }
            return Ok(());
        }

        report::write_items(&mut out, &session.visible_items())?;
        Ok(())
    }
}

/// Search the character roster
#[derive(Parser, Debug)]
pub struct Characters {
    /// Name substring, case-insensitive
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Visual tag the character must carry (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Print the shared tag inventory instead of the roster
    #[arg(long)]
    pub list_tags: bool,
}

impl Characters {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let mut session = load_session(settings)?;
        session.roster_filter.search = self.search;
        session.roster_filter.tags = self.tags.into_iter().collect();

        let mut out = io::stdout().lock();
        if self.list_tags {
            report::write_options(&mut out, "Tags", &session.tag_inventory())?;
        } else {
            report::write_characters(&mut out, &session.visible_characters())?;
        }
        Ok(())
    }
}

/// Rank every item of the catalog into tiers
#[derive(Parser, Debug)]
pub struct Tiers {
    /// Write the ranking as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Tiers {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let session = load_session(settings)?;
        let entries = tier::analyze(session.items().items());

        let mut out = io::stdout().lock();
        report::write_tier_summary(&mut out, &entries)?;

        if let Some(path) = &self.output {
            let json = serde_json::to_string_pretty(&entries)?;
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Tier ranking written to {:?}", path);
        }
        Ok(())
    }
}
