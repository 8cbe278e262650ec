//! Accessory item data model
//!
//! Items with rarity, condition groups, effect text slots, and the
//! per-item selection state (battle member multiplier and the chosen
//! alternative of each multi-choice effect).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::condition::{ConditionGroup, ConditionLogic};
use crate::de;
use crate::tags::TagSet;

/// Highest battle member multiplier
pub const MAX_MULTIPLIER: u8 = 3;

/// Item identifier. Catalogs use both numeric and string ids; `Item`
/// decodes either form through `opt_item_id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of effect text on an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSlot {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub effect: String,
}

impl EffectSlot {
    pub fn new(effect: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
        }
    }
}

/// An equippable accessory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "opt_item_id")]
    pub id: Option<ItemId>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub name: String,
    /// Raw rarity class (`rarity gold`, `rarityawakenedgold`)
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub rarity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Detail page link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de::seq_or_indexed")]
    pub conditions_data: Vec<ConditionGroup>,
    #[serde(default)]
    pub condition_logic: ConditionLogic,
    #[serde(default, deserialize_with = "de::seq_or_indexed")]
    pub slots: Vec<EffectSlot>,
    /// Battle member multiplier, 0..=3
    #[serde(default, deserialize_with = "multiplier")]
    pub multiplier: u8,
    /// Chosen alternative per effect slot index; absent means 0
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selections: BTreeMap<usize, usize>,
}

impl Item {
    /// Whether `other` is the same catalog entry: by id when both carry
    /// one, by name otherwise.
    pub fn same_entry(&self, other: &Item) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name,
        }
    }

    /// Non-empty effect texts with their slot index
    pub fn effects(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.effect.is_empty())
            .map(|(i, slot)| (i, slot.effect.as_str()))
    }

    pub fn has_conditions(&self) -> bool {
        !self.conditions_data.is_empty()
    }

    /// Every condition tag across all groups, raw and clean, regardless of
    /// the item's condition logic
    pub fn condition_tags(&self) -> TagSet {
        let mut tags = TagSet::new();
        for group in &self.conditions_data {
            tags.extend(group.requirements());
        }
        tags
    }

    /// Stored selection for an effect slot (unclamped)
    pub fn selection(&self, slot: usize) -> usize {
        self.selections.get(&slot).copied().unwrap_or(0)
    }

    /// Set the battle member multiplier, clamped to `0..=MAX_MULTIPLIER`
    pub fn set_multiplier(&mut self, multiplier: u8) {
        self.multiplier = multiplier.min(MAX_MULTIPLIER);
    }
}

fn opt_item_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ItemId>, D::Error> {
    Ok(de::opt_string_or_number(deserializer)?.map(ItemId))
}

fn multiplier<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = Option::<u64>::deserialize(deserializer)?.unwrap_or(0);
    Ok(raw.min(MAX_MULTIPLIER as u64) as u8)
}
