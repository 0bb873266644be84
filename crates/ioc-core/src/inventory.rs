//! Inventory snapshots: the full list of IOC records at one point in time.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::errors::InventoryError;
use crate::record::IocRecord;

/// An ordered, read-only list of IOC records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    records: Vec<IocRecord>,
}

impl Inventory {
    /// Parse an inventory from raw JSON bytes.
    ///
    /// The document must be an array of objects. Individual fields are checked
    /// by the operations that need them.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, InventoryError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Array(items) = value else {
            return Err(InventoryError::Malformed(
                "expected a JSON array of IOC records".to_string(),
            ));
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let Value::Object(object) = item else {
                return Err(InventoryError::Malformed(format!(
                    "entry #{index} is not a JSON object"
                )));
            };
            records.push(IocRecord::from_json_object(object));
        }

        Ok(Self { records })
    }

    /// Read and parse the inventory file at `path`.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let bytes = fs::read(path).map_err(|source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    #[must_use]
    pub fn records(&self) -> &[IocRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index records by `name`. A later duplicate replaces an earlier one.
    ///
    /// Fails if any record has no `name`.
    pub fn index_by_name(&self) -> Result<BTreeMap<&str, &IocRecord>, InventoryError> {
        let mut index = BTreeMap::new();
        for (position, record) in self.records.iter().enumerate() {
            let name = record.name().ok_or_else(|| InventoryError::MissingField {
                record: format!("#{position}"),
                field: "name".to_string(),
            })?;
            if index.insert(name, record).is_some() {
                tracing::debug!(name, "duplicate IOC name in inventory; keeping the last record");
            }
        }
        Ok(index)
    }
}

impl From<Vec<IocRecord>> for Inventory {
    fn from(records: Vec<IocRecord>) -> Self {
        Self { records }
    }
}

/// Distinct `host` values in use across the inventory.
///
/// Fails if any record has no `host`.
pub fn list_hosts(inventory: &Inventory) -> Result<BTreeSet<String>, InventoryError> {
    inventory
        .records()
        .iter()
        .map(|record| {
            record
                .host()
                .map(ToString::to_string)
                .ok_or_else(|| InventoryError::MissingField {
                    record: record.name().unwrap_or("<unnamed>").to_string(),
                    field: "host".to_string(),
                })
        })
        .collect()
}
