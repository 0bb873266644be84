//! Inventory file location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("iocs.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryConfig {
    /// Inventory file. Relative paths resolve against `history.repo_root`.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
