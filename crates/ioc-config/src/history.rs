//! Version-control history settings.

use std::path::PathBuf;

use ioc_core::MissingIocPolicy;
use serde::{Deserialize, Serialize};

fn default_repo_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Root of the repository whose history is walked.
    #[serde(default = "default_repo_root")]
    pub repo_root: PathBuf,

    /// How to treat revisions that do not contain the requested IOC.
    #[serde(default)]
    pub missing_ioc: MissingIocPolicy,

    /// Print the commit author next to each timestamp.
    #[serde(default)]
    pub show_author: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            repo_root: default_repo_root(),
            missing_ioc: MissingIocPolicy::default(),
            show_author: false,
        }
    }
}
