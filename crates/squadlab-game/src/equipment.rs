//! Equip slots
//!
//! Exactly three ordered slots. Removing an item shifts the ones after it
//! left and leaves the last slot empty.

use serde::{Deserialize, Serialize};
use squadlab_core::Item;
use thiserror::Error;
use tracing::{info, warn};

use crate::selection;

/// Number of equip slots
pub const SLOT_COUNT: usize = 3;

/// Error when equipping an item
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("{name} is already equipped")]
    AlreadyEquipped { name: String },
    #[error("all equip slots are occupied")]
    SlotsFull,
    #[error("no item matches {key:?}")]
    UnknownItem { key: String },
}

/// The equipped items, in slot order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipSlots {
    slots: [Option<Item>; SLOT_COUNT],
}

impl EquipSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip into the first empty slot. The item's multiplier starts at 0.
    /// Returns the slot index used.
    pub fn equip(&mut self, mut item: Item) -> Result<usize, EquipError> {
        if self.items().any(|(_, existing)| existing.same_entry(&item)) {
            warn!(item = %item.name, "rejected duplicate equip");
            return Err(EquipError::AlreadyEquipped { name: item.name });
        }
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            warn!(item = %item.name, "rejected equip, slots full");
            return Err(EquipError::SlotsFull);
        };
        item.set_multiplier(0);
        info!(item = %item.name, slot = index, "equipped");
        self.slots[index] = Some(item);
        Ok(index)
    }

    /// Remove the item at `index`, shifting later items left
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        let removed = self.slots.get_mut(index)?.take()?;
        self.slots[index..].rotate_left(1);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Occupied slots with their index
    pub fn items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (i, item)))
    }

    /// All slots, empty ones included
    pub fn slots(&self) -> &[Option<Item>; SLOT_COUNT] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Cycle the multiplier of the item at `index`; no-op on an empty slot
    pub fn cycle_multiplier(&mut self, index: usize) -> bool {
        match self.get_mut(index) {
            Some(item) => {
                selection::cycle_multiplier(item);
                true
            }
            None => false,
        }
    }

    /// Advance the alternative of one effect slot of the item at `index`
    pub fn toggle_selection(&mut self, index: usize, slot: usize) -> bool {
        self.get_mut(index)
            .is_some_and(|item| selection::toggle_selection(item, slot))
    }
}
