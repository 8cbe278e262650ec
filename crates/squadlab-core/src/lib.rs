//! Squadlab Core - Data model for squad building and accessory evaluation
//!
//! This crate provides the foundational types used throughout squadlab:
//! - Characters with their visual tags
//! - Items with condition groups and effect slots
//! - The tag normalizer shared by eligibility checks and effect clauses
//! - The 17 canonical stat keys and the stat vector
//! - Rarity label normalization

pub mod character;
pub mod condition;
pub mod de;
pub mod item;
pub mod rarity;
pub mod stat;
pub mod tags;

pub use character::Character;
pub use condition::{ConditionGroup, ConditionLogic, RawConditionGroup};
pub use item::{EffectSlot, Item, ItemId, MAX_MULTIPLIER};
pub use rarity::{border_asset, rarity_key, rarity_label};
pub use stat::{StatFlags, StatKey, StatVector, UnknownStatKey, STAT_COUNT};
pub use tags::{strip_category_prefix, TagSet, CATEGORY_PREFIXES};
