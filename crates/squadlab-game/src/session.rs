//! Squad session
//!
//! Owns the loaded catalogs, the selected character, the equip slots and
//! the filter selections. Every query recomputes from this state.

use std::fmt;

use squadlab_core::{Character, Item};
use tracing::{info, warn};

use crate::catalog::{CharacterCatalog, ItemCatalog};
use crate::equipment::{EquipError, EquipSlots};
use crate::filter::{self, FilterContext};
use crate::roster::{self, RosterFilter};
use crate::stats::{self, StatReport};

#[derive(Debug, Clone, Default)]
pub struct Session {
    characters: CharacterCatalog,
    items: ItemCatalog,
    character: Option<Character>,
    pub equipped: EquipSlots,
    pub filters: FilterContext,
    pub roster_filter: RosterFilter,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn characters(&self) -> &CharacterCatalog {
        &self.characters
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// Replace the character catalog with a load result. A failed load
    /// keeps the previous catalog and hands the error back.
    pub fn apply_character_load<E: fmt::Display>(
        &mut self,
        result: Result<Vec<Character>, E>,
    ) -> Result<usize, E> {
        match result {
            Ok(characters) => {
                self.characters = CharacterCatalog::new(characters);
                info!(count = self.characters.len(), "character catalog replaced");
                Ok(self.characters.len())
            }
            Err(e) => {
                warn!("character load failed, keeping {} characters: {e}", self.characters.len());
                Err(e)
            }
        }
    }

    /// Replace the item catalog with a load result. A failed load keeps
    /// the previous catalog and hands the error back.
    pub fn apply_item_load<E: fmt::Display>(
        &mut self,
        result: Result<Vec<Item>, E>,
    ) -> Result<usize, E> {
        match result {
            Ok(items) => {
                self.items = ItemCatalog::new(items);
                info!(count = self.items.len(), "item catalog replaced");
                Ok(self.items.len())
            }
            Err(e) => {
                warn!("item load failed, keeping {} items: {e}", self.items.len());
                Err(e)
            }
        }
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    /// Select a character by id, code or name. The condition-tag selection
    /// is pruned to what the new character offers; equipped items stay.
    pub fn select_character(&mut self, key: &str) -> Option<&Character> {
        let Some(character) = self.characters.find(key).cloned() else {
            warn!(key, "no character matches");
            return None;
        };
        filter::prune_conditions(&mut self.filters.conditions, &character);
        info!(character = %character.name, "character selected");
        self.character = Some(character);
        self.character.as_ref()
    }

    pub fn clear_character(&mut self) {
        self.character = None;
    }

    /// Equip a catalog item by id or name
    pub fn equip(&mut self, key: &str) -> Result<usize, EquipError> {
        let item = self
            .items
            .find(key)
            .cloned()
            .ok_or_else(|| EquipError::UnknownItem {
                key: key.to_string(),
            })?;
        self.equipped.equip(item)
    }

    /// Items eligible for the selected character that pass the filters
    pub fn visible_items(&self) -> Vec<&Item> {
        filter::filter_items(self.character(), self.items.items(), &self.filters)
    }

    /// Characters matching the roster search
    pub fn visible_characters(&self) -> Vec<&Character> {
        roster::filter_characters(self.characters.characters(), &self.roster_filter)
    }

    pub fn tag_inventory(&self) -> Vec<String> {
        roster::tag_inventory(self.characters.characters())
    }

    pub fn rarity_options(&self) -> Vec<String> {
        filter::rarity_options(self.items.items())
    }

    pub fn stats(&self) -> StatReport {
        stats::aggregate(&self.equipped, self.character())
    }
}
