//! Condition groups and the tag normalizer
//!
//! A condition group is a set of tags a character must all possess. The
//! loaders hand us groups in several physical shapes; [`RawConditionGroup`]
//! decodes every one of them and [`ConditionGroup`] is the single canonical
//! form the rest of the system works with.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de::strings_from_value;
use crate::tags::TagSet;

/// A condition group exactly as a loader delivered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawConditionGroup {
    /// `["Tag: Saiyan", "Tag: Son Family"]`
    List(Vec<Value>),
    /// `"Tag: Saiyan"`
    Text(String),
    /// Wrapper objects (`{"tags": [..]}`, `{"values": [..]}`, `{"value": ..}`,
    /// `{"original_text": ..}`) and index-keyed maps (`{"0": .., "1": ..}`)
    Object(GroupObject),
    /// Numbers, booleans, `null`: no requirement
    Other(Value),
}

/// Object-shaped condition group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<Value>,
    /// Any other keys; an index-keyed map lands here entirely
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

impl GroupObject {
    /// Requirement strings, trying the known fields in priority order before
    /// falling back to treating the object as an index-keyed map.
    fn requirements(&self) -> Vec<String> {
        let fields = [&self.tags, &self.values, &self.value, &self.original_text];
        for field in fields.into_iter().flatten() {
            let found = strings_from_value(field);
            if !found.is_empty() {
                return found;
            }
        }

        // Index-keyed map fallback only when every value is a string
        if !self.rest.is_empty() && self.rest.values().all(Value::is_string) {
            let map = self
                .rest
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<serde_json::Map<_, _>>();
            return strings_from_value(&Value::Object(map));
        }

        Vec::new()
    }
}

/// Canonical condition group: the set of tags a character must possess.
///
/// An empty group places no requirement and is always satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConditionGroup", into = "Vec<String>")]
pub struct ConditionGroup {
    requirements: BTreeSet<String>,
}

impl ConditionGroup {
    /// Build a group from requirement strings. Blank entries are dropped.
    pub fn new<I, S>(requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requirements: requirements
                .into_iter()
                .map(Into::into)
                .filter(|r: &String| !r.trim().is_empty())
                .collect(),
        }
    }

    /// Raw requirement strings
    pub fn requirements(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Requirements in raw and category-stripped form
    pub fn tags(&self) -> TagSet {
        self.requirements().collect()
    }

    /// Whether every requirement is met by `attributes`, matching either the
    /// raw or the clean form of each requirement.
    pub fn is_satisfied_by(&self, attributes: &TagSet) -> bool {
        self.requirements().all(|req| attributes.satisfies(req))
    }
}

impl From<RawConditionGroup> for ConditionGroup {
    fn from(raw: RawConditionGroup) -> Self {
        match raw {
            RawConditionGroup::List(items) => Self::new(strings_from_value(&Value::Array(items))),
            RawConditionGroup::Text(text) => Self::new([text]),
            RawConditionGroup::Object(object) => Self::new(object.requirements()),
            RawConditionGroup::Other(_) => Self::default(),
        }
    }
}

impl From<ConditionGroup> for Vec<String> {
    fn from(group: ConditionGroup) -> Self {
        group.requirements.into_iter().collect()
    }
}

/// How an item's condition groups combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ConditionLogic {
    /// Every group must be satisfied
    #[default]
    And,
    /// At least one group must be satisfied
    Or,
}

impl ConditionLogic {
    /// Combine per-group results
    pub fn combine<I: IntoIterator<Item = bool>>(self, results: I) -> bool {
        let mut results = results.into_iter();
        match self {
            Self::And => results.all(|ok| ok),
            Self::Or => results.any(|ok| ok),
        }
    }
}

impl From<Option<String>> for ConditionLogic {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("or") => Self::Or,
            _ => Self::And,
        }
    }
}

impl From<ConditionLogic> for String {
    fn from(logic: ConditionLogic) -> Self {
        match logic {
            ConditionLogic::And => "AND".to_string(),
            ConditionLogic::Or => "OR".to_string(),
        }
    }
}
