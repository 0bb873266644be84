//! Error types for inventory loading, history access and change tracking.
//!
//! Each error family maps onto one failure class: data access (the source
//! cannot be read), malformed data (content is not an array of records, or a
//! record lacks a required field) and lookup (an IOC name cannot be found).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// The inventory file could not be opened or read.
    #[error("failed to read inventory '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON.
    #[error("inventory is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an array of IOC records.
    #[error("malformed inventory: {0}")]
    Malformed(String),

    /// A record is missing a field the caller requires.
    #[error("IOC record {record} has no '{field}' field")]
    MissingField { record: String, field: String },
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a git repository: {0}")]
    NotGitRepo(PathBuf),

    #[error("git error: {0}")]
    Git(String),
}

#[derive(Debug, Error)]
pub enum TrackError {
    #[error(transparent)]
    History(#[from] HistoryError),

    /// A historical snapshot could not be parsed as an inventory.
    #[error("revision {revision} holds a malformed inventory: {source}")]
    MalformedSnapshot {
        revision: String,
        #[source]
        source: InventoryError,
    },

    /// The IOC is absent from a revision and the policy forbids skipping it.
    #[error("IOC '{name}' not found in revision {revision}")]
    NotInRevision { name: String, revision: String },

    /// The IOC never appears anywhere in the history.
    #[error("IOC '{name}' not found in any revision")]
    IocNotFound { name: String },
}
