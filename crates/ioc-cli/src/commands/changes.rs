use anyhow::Context;
use ioc_config::IocConfig;
use ioc_core::track_changes;
use ioc_history::GitHistory;

use crate::cli::{ChangesArgs, GlobalFlags, OutputFormat};
use crate::output;

/// Handle `iocinv changes <NAME>`.
pub fn handle(args: &ChangesArgs, config: &IocConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::emit(&run(args, config, flags.format)?);
    Ok(())
}

/// Walk the inventory history and render the timeline for one IOC.
pub fn run(args: &ChangesArgs, config: &IocConfig, format: OutputFormat) -> anyhow::Result<String> {
    let history = GitHistory::open(&config.history.repo_root, &config.inventory.path)
        .context("failed to open inventory history")?;
    let policy = args.missing.unwrap_or(config.history.missing_ioc);
    let show_author = args.author || config.history.show_author;

    let timeline = track_changes(&history, &args.name, policy)?;
    if timeline.is_empty() {
        tracing::info!(ioc = %args.name, "no observable changes in history");
    } else {
        tracing::debug!(ioc = %args.name, entries = timeline.entries.len(), "timeline built");
    }

    output::render_timeline(&timeline, format, show_author)
}
