//! Squadlab Game - Squad building logic
//!
//! Provides the eligibility filter, roster search, effect text parsing,
//! stat aggregation, equip slots and the tier analyzer.

pub mod catalog;
pub mod effect;
pub mod equipment;
pub mod filter;
pub mod roster;
pub mod selection;
pub mod session;
pub mod stats;
pub mod tier;

pub use catalog::{CharacterCatalog, ItemCatalog};
pub use effect::{parse_effect, Contribution, EffectContext, Leftover, ParsedEffect, Selector};
pub use equipment::{EquipError, EquipSlots, SLOT_COUNT};
pub use filter::{
    condition_options, effect_mentions, effect_options, filter_items, is_eligible,
    prune_conditions, rarity_options, FilterContext,
};
pub use roster::{filter_characters, tag_inventory, RosterFilter};
pub use selection::{
    cycle_multiplier, has_member_scaling, select_option, selected_option, toggle_selection,
};
pub use session::Session;
pub use stats::{aggregate, OtherEffect, StatReport};
pub use tier::{analyze, ItemClass, Tier, TierEntry, TierMethod};
