//! Roster search
//!
//! Character list filtering by name and visual tags, plus the tag inventory
//! that drives the tag filter choices.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use squadlab_core::Character;

/// Roster search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterFilter {
    /// Case-insensitive name substring
    pub search: String,
    /// Visual tags a character must all carry
    pub tags: BTreeSet<String>,
}

impl RosterFilter {
    pub fn matches(&self, character: &Character) -> bool {
        let search = self.search.trim().to_lowercase();
        let name_match = search.is_empty() || character.name.to_lowercase().contains(&search);
        name_match && self.tags.iter().all(|tag| character.visual_tags.contains(tag))
    }
}

/// Characters matching `filter`, in roster order
pub fn filter_characters<'a>(characters: &'a [Character], filter: &RosterFilter) -> Vec<&'a Character> {
    characters.iter().filter(|c| filter.matches(c)).collect()
}

/// Visual tags shared by more than one character, sorted
pub fn tag_inventory(characters: &[Character]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tag in characters.iter().flat_map(|c| c.visual_tags.iter()) {
        *counts.entry(tag.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_character(name: &str, tags: &[&str]) -> Character {
        Character {
            name: name.to_string(),
            visual_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn roster() -> Vec<Character> {
        vec![
            make_character("Super Saiyan Goku", &["Saiyan", "Son Family", "Goku"]),
            make_character("Gohan (Teen)", &["Saiyan", "Son Family", "Hybrid Saiyan"]),
            make_character("Piccolo", &["Namekian"]),
        ]
    }

    #[test]
    fn test_search_case_insensitive() {
        let roster = roster();
        let filter = RosterFilter {
            search: "GOKU".to_string(),
            ..Default::default()
        };
        let found = filter_characters(&roster, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Super Saiyan Goku");
    }

    #[test]
    fn test_tags_are_anded() {
        let roster = roster();
        let filter = RosterFilter {
            search: String::new(),
            tags: ["Saiyan".to_string(), "Hybrid Saiyan".to_string()].into(),
        };
        let found = filter_characters(&roster, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Gohan (Teen)");
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let roster = roster();
        assert_eq!(filter_characters(&roster, &RosterFilter::default()).len(), 3);
    }

    #[test]
    fn test_tag_inventory_skips_singletons() {
        assert_eq!(
            tag_inventory(&roster()),
            vec!["Saiyan".to_string(), "Son Family".to_string()]
        );
    }
}
