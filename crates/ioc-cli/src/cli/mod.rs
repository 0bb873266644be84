use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{ChangesArgs, Commands};

/// Top-level CLI parser for the `iocinv` binary.
#[derive(Debug, Parser)]
#[command(name = "iocinv", version, about = "Inspect the IOC deployment inventory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root holding the inventory and its history (default: config, then ".")
    #[arg(short, long, global = true)]
    pub repo: Option<String>,

    /// Inventory file, relative to the repository root (default: config, then "iocs.json")
    #[arg(short, long, global = true)]
    pub inventory: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            repo: self.repo.clone(),
            inventory: self.inventory.clone(),
        }
    }
}
