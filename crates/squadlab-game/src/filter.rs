//! Eligibility filter
//!
//! Decides which items a character may equip and applies the three
//! auxiliary item filters (effect name, condition tag, rarity) on top.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use squadlab_core::{rarity_label, Character, Item, StatKey};
use tracing::debug;

use crate::effect::clause::preceded_by_base;

/// Selection sets for the auxiliary item filters. Empty sets filter nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterContext {
    /// Canonical stat names; an item passes if any slot mentions one
    pub effects: BTreeSet<String>,
    /// Condition tags the item's own conditions must all carry
    pub conditions: BTreeSet<String>,
    /// Normalized rarity labels (`Gold`, `Awakened Gold`)
    pub rarities: BTreeSet<String>,
}

impl FilterContext {
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.conditions.is_empty() && self.rarities.is_empty()
    }
}

/// Whether `character` satisfies the item's condition groups under the
/// item's condition logic. Items without groups suit everyone.
pub fn is_eligible(character: &Character, item: &Item) -> bool {
    if !item.has_conditions() {
        return true;
    }
    let attributes = character.attributes();
    let eligible = item
        .condition_logic
        .combine(item.conditions_data.iter().map(|group| group.is_satisfied_by(&attributes)));
    if !eligible {
        debug!(item = %item.name, character = %character.name, "condition groups not met");
    }
    eligible
}

/// Whether the item passes every active auxiliary filter
pub fn passes_filters(item: &Item, ctx: &FilterContext) -> bool {
    matches_effects(item, &ctx.effects)
        && matches_conditions(item, &ctx.conditions)
        && matches_rarities(item, &ctx.rarities)
}

/// Items usable by `character` that pass `ctx`, in catalog order. With no
/// character selected nothing is filtered, auxiliary filters included.
pub fn filter_items<'a>(
    character: Option<&Character>,
    items: &'a [Item],
    ctx: &FilterContext,
) -> Vec<&'a Item> {
    let Some(character) = character else {
        return items.iter().collect();
    };
    items
        .iter()
        .filter(|item| is_eligible(character, item))
        .filter(|item| passes_filters(item, ctx))
        .collect()
}

fn matches_effects(item: &Item, selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || item
            .effects()
            .any(|(_, text)| selected.iter().any(|key| effect_mentions(text, key)))
}

fn matches_conditions(item: &Item, selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    if !item.has_conditions() {
        return false;
    }
    let tags = item.condition_tags();
    selected.iter().all(|tag| tags.contains(tag))
}

fn matches_rarities(item: &Item, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || selected.contains(&rarity_label(&item.rarity))
}

/// The `Strike & Blast` phrase that also grants `key`
fn compound_phrase(key: &str) -> Option<&'static str> {
    match key {
        "Strike Attack" | "Blast Attack" => Some("Strike & Blast Attack"),
        "Strike Defense" | "Blast Defense" => Some("Strike & Blast Defense"),
        "Base Strike Attack" | "Base Blast Attack" => Some("Base Strike & Blast Attack"),
        "Base Strike Defense" | "Base Blast Defense" => Some("Base Strike & Blast Defense"),
        _ => None,
    }
}

/// Whether `needle` occurs in `text` somewhere not preceded by `Base `
fn contains_unqualified(text: &str, needle: &str) -> bool {
    text.match_indices(needle)
        .any(|(idx, _)| !preceded_by_base(text, idx))
}

/// Whether effect text mentions the stat `key`, directly or through its
/// compound phrase. Unqualified keys ignore `Base `-qualified mentions.
pub fn effect_mentions(text: &str, key: &str) -> bool {
    if key.starts_with("Base ") {
        text.contains(key) || compound_phrase(key).is_some_and(|phrase| text.contains(phrase))
    } else {
        contains_unqualified(text, key)
            || compound_phrase(key).is_some_and(|phrase| contains_unqualified(text, phrase))
    }
}

/// Effect filter choices: every canonical stat name, sorted
pub fn effect_options() -> Vec<&'static str> {
    let mut names: Vec<_> = StatKey::ALL.into_iter().map(StatKey::name).collect();
    names.sort_unstable();
    names
}

/// Rarity filter choices: distinct labels across the catalog, sorted
pub fn rarity_options(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !item.rarity.trim().is_empty())
        .map(|item| rarity_label(&item.rarity))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Condition filter choices for a character: its name and visual tags
pub fn condition_options(character: &Character) -> BTreeSet<String> {
    let mut options = character.visual_tags.clone();
    if !character.name.is_empty() {
        options.insert(character.name.clone());
    }
    options
}

/// Drop selected condition tags the character does not offer
pub fn prune_conditions(selected: &mut BTreeSet<String>, character: &Character) {
    let options = condition_options(character);
    selected.retain(|tag| options.contains(tag));
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadlab_core::{ConditionGroup, ConditionLogic, EffectSlot};

    fn make_character(name: &str, tags: &[&str]) -> Character {
        Character {
            name: name.to_string(),
            element: "RED".to_string(),
            rarity: "SPARKING".to_string(),
            visual_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn make_item(name: &str, groups: &[&[&str]], logic: ConditionLogic, effects: &[&str]) -> Item {
        Item {
            name: name.to_string(),
            rarity: "rarity gold".to_string(),
            conditions_data: groups.iter().map(|g| ConditionGroup::new(g.iter().copied())).collect(),
            condition_logic: logic,
            slots: effects.iter().map(|e| EffectSlot::new(*e)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_conditions_is_universal() {
        let item = make_item("Plain", &[], ConditionLogic::And, &[]);
        assert!(is_eligible(&make_character("Krillin", &[]), &item));
    }

    #[test]
    fn test_and_logic_needs_every_group() {
        let item = make_item(
            "Fusion Badge",
            &[&["Tag: Saiyan"], &["Tag: Fusion Warrior"]],
            ConditionLogic::And,
            &[],
        );
        assert!(is_eligible(&make_character("Gogeta", &["Saiyan", "Fusion Warrior"]), &item));
        assert!(!is_eligible(&make_character("Goku", &["Saiyan"]), &item));
    }

    #[test]
    fn test_or_logic_needs_any_group() {
        let item = make_item("Either", &[&["Tag: A"], &["Tag: B"]], ConditionLogic::Or, &[]);
        assert!(is_eligible(&make_character("x", &["A"]), &item));
        assert!(is_eligible(&make_character("x", &["B"]), &item));
        assert!(is_eligible(&make_character("x", &["A", "B"]), &item));
        assert!(!is_eligible(&make_character("x", &["C"]), &item));
    }

    #[test]
    fn test_group_matches_name_and_element() {
        let item = make_item(
            "Named",
            &[&["Character: Krillin", "Element: RED"]],
            ConditionLogic::And,
            &[],
        );
        assert!(is_eligible(&make_character("Krillin", &[]), &item));
        assert!(!is_eligible(&make_character("Yamcha", &[]), &item));
    }

    #[test]
    fn test_empty_group_is_satisfied() {
        let item = make_item("Empty Group", &[&[]], ConditionLogic::And, &[]);
        assert!(is_eligible(&make_character("Anyone", &[]), &item));
    }

    #[test]
    fn test_effect_filter_respects_base_qualifier() {
        assert!(effect_mentions("Strike Attack +10%", "Strike Attack"));
        assert!(!effect_mentions("Base Strike Attack +10%", "Strike Attack"));
        assert!(effect_mentions("Base Strike Attack +10%", "Base Strike Attack"));
        assert!(effect_mentions("Strike & Blast Attack +10%", "Blast Attack"));
        assert!(!effect_mentions("Base Strike & Blast Attack +10%", "Blast Attack"));
        assert!(effect_mentions("Base Strike & Blast Defense +5%", "Base Blast Defense"));
        assert!(effect_mentions("Base Critical 5%, Critical 3%", "Critical"));
    }

    #[test]
    fn test_filter_items_preserves_order() {
        let items = vec![
            make_item("A", &[], ConditionLogic::And, &["Critical +5%"]),
            make_item("B", &[&["Tag: Android"]], ConditionLogic::And, &["Critical +5%"]),
            make_item("C", &[], ConditionLogic::And, &["Damage Guard +5%"]),
            make_item("D", &[], ConditionLogic::And, &["Critical +9%"]),
        ];
        let goku = make_character("Goku", &["Saiyan"]);
        let ctx = FilterContext {
            effects: ["Critical".to_string()].into(),
            ..Default::default()
        };
        let names: Vec<_> = filter_items(Some(&goku), &items, &ctx)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "D"]);

        let all: Vec<_> = filter_items(None, &items, &FilterContext::default());
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_filter_items_without_character_ignores_filters() {
        let items = vec![
            make_item("A", &[], ConditionLogic::And, &["Critical +5%"]),
            make_item("B", &[&["Tag: Android"]], ConditionLogic::And, &["Damage Guard +5%"]),
        ];
        let ctx = FilterContext {
            effects: ["Critical".to_string()].into(),
            conditions: ["Android".to_string()].into(),
            rarities: ["Gold".to_string()].into(),
        };
        let names: Vec<_> = filter_items(None, &items, &ctx)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_condition_filter() {
        let tagged = make_item("Tagged", &[&["Tag: Saiyan", "Tag: GT"]], ConditionLogic::And, &[]);
        let plain = make_item("Plain", &[], ConditionLogic::And, &[]);
        let ctx = FilterContext {
            conditions: ["Saiyan".to_string()].into(),
            ..Default::default()
        };
        assert!(passes_filters(&tagged, &ctx));
        assert!(!passes_filters(&plain, &ctx));

        let ctx = FilterContext {
            conditions: ["Saiyan".to_string(), "Namekian".to_string()].into(),
            ..Default::default()
        };
        assert!(!passes_filters(&tagged, &ctx));
    }

    #[test]
    fn test_rarity_filter_and_options() {
        let mut awakened = make_item("Awakened", &[], ConditionLogic::And, &[]);
        awakened.rarity = "rarity awakenedgold".to_string();
        let gold = make_item("Gold", &[], ConditionLogic::And, &[]);

        let ctx = FilterContext {
            rarities: ["Awakened Gold".to_string()].into(),
            ..Default::default()
        };
        assert!(passes_filters(&awakened, &ctx));
        assert!(!passes_filters(&gold, &ctx));

        assert_eq!(
            rarity_options(&[gold, awakened]),
            vec!["Awakened Gold".to_string(), "Gold".to_string()]
        );
    }

    #[test]
    fn test_effect_options_sorted() {
        let options = effect_options();
        assert_eq!(options.len(), 17);
        assert_eq!(options[0], "Base Blast Attack");
        assert!(options.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_prune_conditions() {
        let goku = make_character("Goku", &["Saiyan", "Son Family"]);
        let mut selected: BTreeSet<String> =
            ["Saiyan".to_string(), "Namekian".to_string(), "Goku".to_string()].into();
        prune_conditions(&mut selected, &goku);
        assert_eq!(selected, ["Goku".to_string(), "Saiyan".to_string()].into());
    }
}
