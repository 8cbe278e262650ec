//! Tag vocabulary shared by eligibility checks and effect clauses
//!
//! Condition tags frequently carry a category prefix (`Tag: Saiyan`,
//! `Element: RED`). A prefixed tag and its bare form are treated as the
//! same requirement.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Category prefixes recognized at the start of a tag
pub const CATEGORY_PREFIXES: &[&str] = &["Tag:", "Episode:", "Element:", "Character:", "Rarity:"];

/// Strip a leading category prefix, along with any whitespace after the colon.
///
/// Tags without a recognized prefix are returned unchanged.
pub fn strip_category_prefix(tag: &str) -> &str {
    CATEGORY_PREFIXES
        .iter()
        .find_map(|prefix| tag.strip_prefix(*prefix))
        .map(str::trim_start)
        .unwrap_or(tag)
}

/// A set of tags holding both the raw and the prefix-stripped form of every
/// inserted string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag in raw and clean form. Blank strings are ignored.
    pub fn insert(&mut self, tag: &str) {
        if tag.trim().is_empty() {
            return;
        }
        let clean = strip_category_prefix(tag);
        if clean != tag && !clean.is_empty() {
            self.tags.insert(clean.to_string());
        }
        self.tags.insert(tag.to_string());
    }

    /// Exact membership test
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether a requirement is met, by its raw or its clean form
    pub fn satisfies(&self, requirement: &str) -> bool {
        self.contains(requirement) || self.contains(strip_category_prefix(requirement))
    }

    /// Whether every tag of `other` is present here
    pub fn is_superset(&self, other: &TagSet) -> bool {
        self.tags.is_superset(&other.tags)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: AsRef<str>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
