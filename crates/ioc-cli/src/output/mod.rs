use std::collections::BTreeSet;
use std::fmt::Write;

use ioc_core::Timeline;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Print rendered output verbatim.
pub fn emit(rendered: &str) {
    print!("{rendered}");
}

/// One host per line in sorted order, or a JSON array.
pub fn render_hosts(hosts: &BTreeSet<String>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for host in hosts {
                writeln!(out, "{host}")?;
            }
            Ok(out)
        }
        OutputFormat::Json => render_json(hosts),
    }
}

/// Text layout per entry: a blank line, the timestamp (plus author when
/// requested), then one indented `field: description` line per change.
pub fn render_timeline(
    timeline: &Timeline,
    format: OutputFormat,
    show_author: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for entry in &timeline.entries {
                writeln!(out)?;
                write!(out, "{}", entry.revision.display_timestamp())?;
                if let Some(author) = entry.revision.author.as_deref().filter(|_| show_author) {
                    write!(out, "  {author}")?;
                }
                writeln!(out)?;
                for change in &entry.changes {
                    writeln!(out, "  {change}")?;
                }
            }
            Ok(out)
        }
        OutputFormat::Json => render_json(timeline),
    }
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}
