//! Selection state
//!
//! Per-item battle member multiplier and per-slot active alternative of
//! multi-choice effects. Every operation is a no-op on out-of-range input.

use std::sync::LazyLock;

use regex::Regex;
use squadlab_core::{Item, MAX_MULTIPLIER};

use crate::effect::option_count;

static MEMBER_SCALING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)per .* member|for each .* member|when .* is a battle member")
        .expect("valid regex")
});

/// Whether any effect scales with battle members, i.e. the multiplier
/// control is relevant for this item
pub fn has_member_scaling(item: &Item) -> bool {
    item.effects().any(|(_, text)| MEMBER_SCALING.is_match(text))
}

/// Number of alternatives of an effect slot; 0 for a missing slot
pub fn slot_options(item: &Item, slot: usize) -> usize {
    item.slots
        .get(slot)
        .map_or(0, |s| option_count(&s.effect))
}

/// Active alternative of an effect slot, clamped to its option count
pub fn selected_option(item: &Item, slot: usize) -> usize {
    let options = slot_options(item, slot);
    item.selection(slot).min(options.saturating_sub(1))
}

/// Advance a multi-choice slot to its next alternative, wrapping around.
/// Returns whether anything changed.
pub fn toggle_selection(item: &mut Item, slot: usize) -> bool {
    let options = slot_options(item, slot);
    if options < 2 {
        return false;
    }
    let next = (selected_option(item, slot) + 1) % options;
    item.selections.insert(slot, next);
    true
}

/// Choose an alternative of a multi-choice slot directly, clamped to its
/// option count. Returns whether the slot has alternatives.
pub fn select_option(item: &mut Item, slot: usize, index: usize) -> bool {
    let options = slot_options(item, slot);
    if options < 2 {
        return false;
    }
    item.selections.insert(slot, index.min(options - 1));
    true
}

/// Cycle the multiplier 0 -> 1 -> 2 -> 3 -> 0
pub fn cycle_multiplier(item: &mut Item) {
    let next = (item.multiplier.min(MAX_MULTIPLIER) + 1) % (MAX_MULTIPLIER + 1);
    item.set_multiplier(next);
}
