//! Loadout files
//!
//! A loadout names a character, up to three items with their multiplier
//! and chosen alternatives, and the filter selections:
//!
//! ```toml
//! character = "Super Saiyan Goku"
//!
//! [[items]]
//! key = "1578"
//! multiplier = 2
//! selections = [1]
//!
//! [filters]
//! effects = ["Critical"]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use squadlab_core::StatKey;
use squadlab_game::{select_option, FilterContext, RosterFilter, Session};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    /// Character id, code or name
    pub character: Option<String>,
    pub items: Vec<LoadoutItem>,
    pub filters: FilterContext,
    pub roster: RosterFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadoutItem {
    /// Item id or name
    pub key: String,
    #[serde(default)]
    pub multiplier: u8,
    /// Chosen alternative per effect slot, by slot position
    #[serde(default)]
    pub selections: Vec<usize>,
}

impl Loadout {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read loadout {}", path.display()))?;
        let loadout: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse loadout {}", path.display()))?;
        loadout.validate()?;
        Ok(loadout)
    }

    /// Reject effect filters that name no canonical stat
    pub fn validate(&self) -> Result<()> {
        for effect in &self.filters.effects {
            effect.parse::<StatKey>()?;
        }
        Ok(())
    }

    /// Select the character, equip the items and apply their selection
    /// state. Stops at the first item that cannot be equipped.
    pub fn apply(&self, session: &mut Session) -> Result<()> {
        session.filters = self.filters.clone();
        session.roster_filter = self.roster.clone();

        if let Some(key) = &self.character {
            session
                .select_character(key)
                .with_context(|| format!("No character matches {key:?}"))?;
        }

        for entry in &self.items {
            let index = session
                .equip(&entry.key)
                .with_context(|| format!("Cannot equip {:?}", entry.key))?;
            let Some(item) = session.equipped.get_mut(index) else {
                continue;
            };
            item.set_multiplier(entry.multiplier);
            for (slot, &choice) in entry.selections.iter().enumerate() {
                if !select_option(item, slot, choice) && choice > 0 {
                    debug!(item = %item.name, slot, "slot has no alternatives, selection ignored");
                }
            }
        }
        Ok(())
    }
}
