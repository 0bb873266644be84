//! IOC records and the record-level diff.
//!
//! A record is a flat mapping from field name to string value. Two helpers
//! operate on pairs of records:
//!
//! - [`is_same`]: strict structural equality
//! - [`get_changes`]: the ordered list of edits turning one record into another
//!
//! Diffs are emitted in three phases (added, removed, changed). Inside each
//! phase fields are visited in lexicographic order, so output is reproducible.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker shown in place of a value when a field was removed.
pub const DELETED_SENTINEL: &str = "(deleted key)";

/// One IOC record: field name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IocRecord {
    fields: BTreeMap<String, String>,
}

impl IocRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object.
    ///
    /// String values are kept verbatim; any other value is stored as its
    /// compact JSON text so it still takes part in comparisons. That is JSON
    /// spelling (`true`, `null`), not Python's `str()` (`True`, `None`).
    #[must_use]
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        object
            .into_iter()
            .map(|(field, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (field, value)
            })
            .collect()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.get("host")
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for IocRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for IocRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_json_object)
    }
}

/// What happened to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Change {
    /// Field was added or its value changed; carries the new value.
    Set(String),
    Deleted,
}

/// A single `(field, description)` pair of a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub field: String,
    pub change: Change,
}

impl ChangeEntry {
    pub fn set(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            change: Change::Set(value.into()),
        }
    }

    pub fn deleted(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            change: Change::Deleted,
        }
    }

    /// The new value, or [`DELETED_SENTINEL`] for a removed field.
    #[must_use]
    pub fn description(&self) -> &str {
        match &self.change {
            Change::Set(value) => value,
            Change::Deleted => DELETED_SENTINEL,
        }
    }
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.description())
    }
}

/// Are `d1` and `d2` the same as far as deployment is concerned?
///
/// True iff both carry exactly the same field names with identical values.
#[must_use]
pub fn is_same(d1: &IocRecord, d2: &IocRecord) -> bool {
    d1.len() == d2.len() && d1.iter().all(|(field, value)| d2.get(field) == Some(value))
}

/// Edits that turn `old` into `new`.
///
/// Added fields come first, then removed fields, then fields whose value
/// changed. Unchanged fields produce nothing, so `get_changes(d, d)` is empty.
#[must_use]
pub fn get_changes(old: &IocRecord, new: &IocRecord) -> Vec<ChangeEntry> {
    let added = new
        .iter()
        .filter(|&(field, _)| !old.contains(field))
        .map(|(field, value)| ChangeEntry::set(field, value));

    let removed = old
        .fields()
        .filter(|field| !new.contains(field))
        .map(ChangeEntry::deleted);

    let changed = new
        .iter()
        .filter(|&(field, value)| old.get(field).is_some_and(|prev| prev != value))
        .map(|(field, value)| ChangeEntry::set(field, value));

    added.chain(removed).chain(changed).collect()
}

/// Replay `changes` onto a copy of `base`.
#[must_use]
pub fn apply_changes(base: &IocRecord, changes: &[ChangeEntry]) -> IocRecord {
    let mut record = base.clone();
    for entry in changes {
        match &entry.change {
            Change::Set(value) => {
                record.insert(entry.field.clone(), value.clone());
            }
            Change::Deleted => {
                record.remove(&entry.field);
            }
        }
    }
    record
}
