use clap::{Args, Subcommand};
use ioc_core::MissingIocPolicy;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List every distinct host currently running an IOC.
    Hosts,
    /// Show the configuration history of one IOC.
    Changes(ChangesArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ChangesArgs {
    /// IOC name to trace.
    pub name: String,

    /// Show the commit author next to each timestamp.
    #[arg(long)]
    pub author: bool,

    /// What to do with revisions that do not contain the IOC.
    #[arg(long, value_parser = parse_policy)]
    pub missing: Option<MissingIocPolicy>,
}

fn parse_policy(value: &str) -> Result<MissingIocPolicy, String> {
    value.parse()
}
