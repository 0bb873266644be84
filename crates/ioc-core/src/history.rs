//! Historical inventory snapshots and the provider seam that yields them.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::errors::HistoryError;

/// Format used when printing a revision timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Metadata for one revision of the inventory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionInfo {
    /// Revision identifier (a commit hash for git histories).
    pub id: String,
    /// Commit time in the committer's own UTC offset.
    pub timestamp: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl RevisionInfo {
    pub fn new(id: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.into(),
            timestamp,
            author: None,
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS+HH:MM`.
    #[must_use]
    pub fn display_timestamp(&self) -> impl fmt::Display + '_ {
        self.timestamp.format(TIMESTAMP_FORMAT)
    }
}

/// Raw inventory content as it existed at one revision.
#[derive(Debug, Clone)]
pub struct HistoricalSnapshot {
    pub revision: RevisionInfo,
    pub content: Vec<u8>,
}

/// Source of historical inventory snapshots.
///
/// Implementations return snapshots oldest first and leave out revisions in
/// which the inventory file does not exist. Providers are read-only.
pub trait HistoryProvider {
    fn snapshots(&self) -> Result<Vec<HistoricalSnapshot>, HistoryError>;
}

/// A fixed, in-memory history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    snapshots: Vec<HistoricalSnapshot>,
}

impl InMemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot as the newest revision.
    pub fn push(&mut self, revision: RevisionInfo, content: impl Into<Vec<u8>>) {
        self.snapshots.push(HistoricalSnapshot {
            revision,
            content: content.into(),
        });
    }
}

impl HistoryProvider for InMemoryHistory {
    fn snapshots(&self) -> Result<Vec<HistoricalSnapshot>, HistoryError> {
        Ok(self.snapshots.clone())
    }
}

impl<P: HistoryProvider + ?Sized> HistoryProvider for &P {
    fn snapshots(&self) -> Result<Vec<HistoricalSnapshot>, HistoryError> {
        (**self).snapshots()
    }
}
