//! # ioc-config
//!
//! Layered configuration loading for the IOC inventory tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`IOCINV_*` prefix, `__` as separator)
//! 2. Project-level `iocinv.toml` in the current directory
//! 3. User-level `~/.config/iocinv/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `IOCINV_HISTORY__REPO_ROOT` -> `history.repo_root`,
//! `IOCINV_INVENTORY__PATH` -> `inventory.path`, and so on.
//!
//! # Usage
//!
//! ```no_run
//! use ioc_config::IocConfig;
//!
//! let config = IocConfig::load_with_dotenv().expect("config");
//! println!("inventory: {}", config.inventory_file().display());
//! ```

mod error;
mod history;
mod inventory;

pub use error::ConfigError;
pub use history::HistoryConfig;
pub use inventory::InventoryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the project-local config file.
pub const PROJECT_CONFIG_FILE: &str = "iocinv.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IocConfig {
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl IocConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory (if any), then [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("IOCINV_").split("__"))
    }

    /// Inventory file on disk: `inventory.path` joined onto `history.repo_root`
    /// unless it is already absolute.
    #[must_use]
    pub fn inventory_file(&self) -> PathBuf {
        if self.inventory.path.is_absolute() {
            self.inventory.path.clone()
        } else {
            self.history.repo_root.join(&self.inventory.path)
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("iocinv").join("config.toml"))
    }
}
