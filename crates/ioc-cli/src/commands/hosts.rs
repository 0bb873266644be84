use anyhow::Context;
use ioc_config::IocConfig;
use ioc_core::{Inventory, list_hosts};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `iocinv hosts`.
pub fn handle(config: &IocConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::emit(&run(config, flags.format)?);
    Ok(())
}

/// Load the current inventory and render its hosts.
pub fn run(config: &IocConfig, format: OutputFormat) -> anyhow::Result<String> {
    let path = config.inventory_file();
    let inventory = Inventory::load(&path)
        .with_context(|| format!("failed to load inventory from {}", path.display()))?;
    let hosts = list_hosts(&inventory)?;
    tracing::debug!(iocs = inventory.len(), hosts = hosts.len(), "listed hosts");

    output::render_hosts(&hosts, format)
}
