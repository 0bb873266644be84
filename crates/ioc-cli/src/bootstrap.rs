use std::path::PathBuf;

use ioc_config::IocConfig;

use crate::cli::GlobalFlags;

/// Load layered config, then apply command-line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<IocConfig> {
    let mut config = IocConfig::load_with_dotenv()?;
    apply_overrides(&mut config, flags);
    tracing::debug!(
        repo_root = %config.history.repo_root.display(),
        inventory = %config.inventory.path.display(),
        "configuration loaded"
    );
    Ok(config)
}

fn apply_overrides(config: &mut IocConfig, flags: &GlobalFlags) {
    if let Some(repo) = &flags.repo {
        config.history.repo_root = PathBuf::from(repo);
    }
    if let Some(inventory) = &flags.inventory {
        config.inventory.path = PathBuf::from(inventory);
    }
}
