//! Stat aggregation
//!
//! Sums the parsed contributions of every equipped effect into one stat
//! vector, flags stats touched by multi-choice effects, and collects the
//! text the parser could not turn into numbers.

use serde::Serialize;
use squadlab_core::{Character, StatFlags, StatKey, StatVector};

use crate::effect::{parse_effect, EffectContext, Leftover};
use crate::equipment::EquipSlots;
use crate::selection::selected_option;

/// One entry of the other-effects report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OtherEffect {
    /// Leftover description, deduplicated across slots
    Text { text: String },
    /// Multi-choice effect of one item slot
    Selector {
        item_index: usize,
        slot_index: usize,
        options: Vec<String>,
        selected: usize,
    },
}

/// Aggregated stat profile of the equipped items
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatReport {
    pub totals: StatVector,
    pub conditional: StatFlags,
    pub other_effects: Vec<OtherEffect>,
}

impl StatReport {
    pub fn get(&self, key: StatKey) -> f64 {
        self.totals.get(key)
    }

    pub fn is_conditional(&self, key: StatKey) -> bool {
        self.conditional.is_set(key)
    }

    /// Share of the gauge filled by a stat, in `0.0..=1.0`
    pub fn gauge(&self, key: StatKey, scale: f64) -> f64 {
        if scale <= 0.0 {
            return 0.0;
        }
        (self.get(key) / scale).clamp(0.0, 1.0)
    }

    fn push_text(&mut self, text: String) {
        let duplicate = self
            .other_effects
            .iter()
            .any(|e| matches!(e, OtherEffect::Text { text: seen } if *seen == text));
        if !duplicate {
            self.other_effects.push(OtherEffect::Text { text });
        }
    }
}

/// Evaluate every equipped effect for `character`
pub fn aggregate(slots: &EquipSlots, character: Option<&Character>) -> StatReport {
    let mut report = StatReport::default();

    for (item_index, item) in slots.items() {
        for (slot_index, text) in item.effects() {
            let ctx = EffectContext {
                character,
                multiplier: item.multiplier,
                selection: selected_option(item, slot_index),
            };
            let parsed = parse_effect(text, &ctx);

            for contribution in &parsed.contributions {
                report.totals.add(contribution.stat, contribution.value);
                if contribution.conditional {
                    report.conditional.set(contribution.stat);
                }
            }

            match parsed.leftover {
                Some(Leftover::Text { text }) => report.push_text(text),
                Some(Leftover::Selector(selector)) => {
                    report.other_effects.push(OtherEffect::Selector {
                        item_index,
                        slot_index,
                        options: selector.options,
                        selected: selector.selected,
                    })
                }
                None => {}
            }
        }
    }

    report
}
