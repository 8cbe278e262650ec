//! Catalog loader
//!
//! Two layouts are accepted:
//! - a JSON array of records (the local export)
//! - a JSON object keyed by document id (a remote-store snapshot), where
//!   each record may omit its own id
//!
//! Loads are all-or-nothing: one malformed record fails the whole catalog.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use squadlab_core::{Character, Item, ItemId};
use tracing::{debug, info};

use crate::error::LoadError;

/// A record that can be loaded from a catalog
pub trait CatalogRecord: DeserializeOwned {
    /// Plural noun for log and error messages
    const KIND: &'static str;

    /// Fill in the id from the snapshot key when the record has none
    fn assign_document_id(&mut self, id: &str);
}

impl CatalogRecord for Character {
    const KIND: &'static str = "characters";

    fn assign_document_id(&mut self, id: &str) {
        if self.id.is_none() {
            self.id = Some(id.to_string());
        }
    }
}

impl CatalogRecord for Item {
    const KIND: &'static str = "items";

    fn assign_document_id(&mut self, id: &str) {
        if self.id.is_none() {
            self.id = Some(ItemId(id.to_string()));
        }
    }
}

/// Layout of a catalog document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON array of records
    Array,
    /// JSON object of records keyed by document id
    Snapshot,
}

impl CatalogFormat {
    pub fn detect(value: &Value) -> Option<Self> {
        match value {
            Value::Array(_) => Some(Self::Array),
            Value::Object(_) => Some(Self::Snapshot),
            _ => None,
        }
    }
}

/// Parse a catalog from JSON text in either layout
pub fn parse_catalog<T: CatalogRecord>(json: &str) -> Result<Vec<T>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let format = CatalogFormat::detect(&value).ok_or(LoadError::Layout)?;
    debug!(?format, kind = T::KIND, "parsing catalog");

    let records: Vec<T> = match value {
        Value::Array(entries) => entries
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?,
        Value::Object(documents) => documents
            .into_iter()
            .map(|(id, document)| {
                let mut record: T = serde_json::from_value(document)?;
                record.assign_document_id(&id);
                Ok(record)
            })
            .collect::<Result<_, serde_json::Error>>()?,
        _ => return Err(LoadError::Layout),
    };

    if records.is_empty() {
        return Err(LoadError::Empty { kind: T::KIND });
    }
    Ok(records)
}

/// Read and parse a catalog file
pub fn read_catalog<T: CatalogRecord>(path: &Path) -> Result<Vec<T>, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_catalog(&json)?;
    info!(count = records.len(), kind = T::KIND, path = %path.display(), "catalog loaded");
    Ok(records)
}
