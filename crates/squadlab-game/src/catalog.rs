//! Catalogs — the loaded item and character lists

use squadlab_core::{Character, Item};

/// The loaded accessory items, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// All items in the catalog.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look an item up by id, falling back to an exact name match.
    pub fn find(&self, key: &str) -> Option<&Item> {
        let key = key.trim();
        self.items
            .iter()
            .find(|item| item.id.as_ref().is_some_and(|id| id.0 == key))
            .or_else(|| self.items.iter().find(|item| item.name == key))
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The loaded character roster, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterCatalog {
    characters: Vec<Character>,
}

impl CharacterCatalog {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Look a character up by id or code, falling back to a name match
    /// (exact first, then case-insensitive).
    pub fn find(&self, key: &str) -> Option<&Character> {
        let key = key.trim();
        let by_id = |c: &&Character| {
            c.id.as_deref() == Some(key) || c.code.as_deref() == Some(key)
        };
        self.characters
            .iter()
            .find(by_id)
            .or_else(|| self.characters.iter().find(|c| c.name == key))
            .or_else(|| {
                self.characters
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(key))
            })
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
