//! Change timeline for a single IOC across the inventory history.
//!
//! The walk keeps one piece of state, the last known record for the IOC,
//! starting empty. Each revision is diffed against it; revisions that change
//! something become timeline entries and replace the state with the full
//! current record. Revisions with no change are dropped. Because the state
//! starts empty, the first revision containing the IOC always produces an
//! entry listing every field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TrackError;
use crate::history::{HistoryProvider, RevisionInfo};
use crate::inventory::Inventory;
use crate::record::{ChangeEntry, IocRecord, get_changes};

/// What to do with a revision whose inventory does not contain the IOC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIocPolicy {
    /// Treat the IOC as not yet created (or already retired) and move on.
    #[default]
    Skip,
    /// Abort the walk with [`TrackError::NotInRevision`].
    Error,
}

impl MissingIocPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for MissingIocPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingIocPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Self::Skip),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown missing-IOC policy '{other}' (expected skip or error)")),
        }
    }
}

/// One revision that changed the IOC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub revision: RevisionInfo,
    pub changes: Vec<ChangeEntry>,
}

/// Every observable change to one IOC, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub ioc: String,
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk `history` oldest to newest and collect the changes made to `name`.
pub fn track_changes<H>(
    history: &H,
    name: &str,
    policy: MissingIocPolicy,
) -> Result<Timeline, TrackError>
where
    H: HistoryProvider + ?Sized,
{
    let mut last = IocRecord::new();
    let mut seen = false;
    let mut entries = Vec::new();

    for snapshot in history.snapshots()? {
        let revision = snapshot.revision;
        let malformed = |source| TrackError::MalformedSnapshot {
            revision: revision.id.clone(),
            source,
        };
        let inventory = Inventory::from_slice(&snapshot.content).map_err(malformed)?;
        let index = inventory.index_by_name().map_err(malformed)?;

        let Some(current) = index.get(name).copied() else {
            match policy {
                MissingIocPolicy::Skip => {
                    tracing::debug!(ioc = name, revision = %revision.id, "IOC absent from revision; skipping");
                    continue;
                }
                MissingIocPolicy::Error => {
                    return Err(TrackError::NotInRevision {
                        name: name.to_string(),
                        revision: revision.id,
                    });
                }
            }
        };
        seen = true;

        let changes = get_changes(&last, current);
        if changes.is_empty() {
            tracing::trace!(ioc = name, revision = %revision.id, "no change");
            continue;
        }

        tracing::debug!(
            ioc = name,
            revision = %revision.id,
            changes = changes.len(),
            "IOC changed"
        );
        last = current.clone();
        entries.push(TimelineEntry { revision, changes });
    }

    if !seen {
        return Err(TrackError::IocNotFound {
            name: name.to_string(),
        });
    }

    Ok(Timeline {
        ioc: name.to_string(),
        entries,
    })
}
