//! Playable character record

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::de;
use crate::tags::{strip_category_prefix, TagSet};

/// A character from the roster catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub name: String,
    /// Element code (`RED`, `YEL`, `PUR`, `GRN`, `BLU`, `LGT`, `DRK`)
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub element: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub rarity: String,
    /// Catalog code (`DBL01-01S`), used by some conditions in place of tags
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Visual tags; arrive as an array or an index-keyed map
    #[serde(default, deserialize_with = "de::string_set")]
    pub visual_tags: BTreeSet<String>,
}

impl Character {
    /// Everything a condition group may test against: name, element,
    /// rarity, id, code and every visual tag, in raw and clean form.
    pub fn attributes(&self) -> TagSet {
        let mut attrs = TagSet::new();
        attrs.insert(&self.name);
        attrs.insert(&self.element);
        attrs.insert(&self.rarity);
        if let Some(id) = &self.id {
            attrs.insert(id);
        }
        if let Some(code) = &self.code {
            attrs.insert(code);
        }
        attrs.extend(&self.visual_tags);
        attrs
    }

    /// Whether the character carries `tag`, comparing prefix-stripped forms
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = strip_category_prefix(tag);
        self.visual_tags.contains(tag)
            || self
                .visual_tags
                .iter()
                .any(|own| strip_category_prefix(own) == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_from_array_tags() {
        let json = r#"{
            "id": "c1",
            "name": "Super Saiyan Goku",
            "element": "YEL",
            "rarity": "ULTRA",
            "visual_tags": ["Saiyan", "Son Family", "Tag: Goku"]
        }"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.id.as_deref(), Some("c1"));
        assert_eq!(character.visual_tags.len(), 3);
        assert!(character.code.is_none());
    }

    #[test]
    fn test_character_from_index_map_tags() {
        let array: Character =
            serde_json::from_str(r#"{"name": "Vegeta", "visual_tags": ["Saiyan", "Vegeta"]}"#)
                .unwrap();
        let map: Character = serde_json::from_str(
            r#"{"name": "Vegeta", "visual_tags": {"0": "Saiyan", "1": "Vegeta"}}"#,
        )
        .unwrap();
        assert_eq!(array.visual_tags, map.visual_tags);
    }

    #[test]
    fn test_character_minimal_json() {
        let character: Character = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(character.id.as_deref(), Some("7"));
        assert_eq!(character.name, "");
        assert!(character.visual_tags.is_empty());
    }

    #[test]
    fn test_attributes_cover_all_fields() {
        let character = Character {
            id: Some("c9".into()),
            name: "Piccolo".into(),
            element: "GRN".into(),
            rarity: "SPARKING".into(),
            code: Some("DBL02-03S".into()),
            image: None,
            visual_tags: ["Namekian".to_string(), "Tag: Regeneration".to_string()].into(),
        };
        let attrs = character.attributes();
        for expected in ["c9", "Piccolo", "GRN", "SPARKING", "DBL02-03S", "Namekian", "Regeneration"] {
            assert!(attrs.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_has_tag_ignores_prefix() {
        let character = Character {
            visual_tags: ["Saiyan".to_string()].into(),
            ..Default::default()
        };
        assert!(character.has_tag("Saiyan"));
        assert!(character.has_tag("Tag: Saiyan"));
        assert!(!character.has_tag("Android"));
    }
}
