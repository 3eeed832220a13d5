//! Previews and listings.
//!
//! This module decides *what* an operator sees (which fields, in which
//! order); the writer it is handed decides where it goes.

use std::io::{self, Write};

use crate::colors::Painter;
use crate::records::{ClusterRecord, LimitField, Limits};
use crate::types::OutputMode;

/// Width of the `Name` column in human listings.
const NAME_WIDTH: usize = 10;
/// Width of each limit column in human listings.
const LIMIT_WIDTH: usize = 10;

/// Rendering switches shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub painter: Painter,
    pub output: OutputMode,
    /// Print the header row (and rule) on listings.
    pub header: bool,
    /// Include limit columns on listings.
    pub long: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            painter: Painter::plain(),
            output: OutputMode::Human,
            header: true,
            long: false,
        }
    }
}

/// Names about to be added.
pub fn write_add_preview(
    out: &mut dyn Write,
    opts: &ReportOptions,
    staged: &[ClusterRecord],
) -> io::Result<()> {
    writeln!(out, " {}", opts.painter.header("Adding Cluster(s)"))?;
    for cluster in staged {
        writeln!(out, "  {:<13} = {}", "Name", opts.painter.name(&cluster.name))?;
    }
    Ok(())
}

/// A requested name that is already present and will not be added.
pub fn write_skip_existing(out: &mut dyn Write, opts: &ReportOptions, name: &str) -> io::Result<()> {
    writeln!(
        out,
        " {}",
        opts.painter
            .warn(&format!("This cluster {name} already exists.  Not adding."))
    )
}

/// Limits applied to every cluster in an add, or the patch of a modify.
pub fn write_limits(
    out: &mut dyn Write,
    opts: &ReportOptions,
    title: &str,
    limits: &Limits,
) -> io::Result<()> {
    writeln!(out, " {}", opts.painter.header(title))?;
    for (field, value) in limits.iter_set() {
        writeln!(out, "  {:<13} = {}", field.label(), opts.painter.number(value))?;
    }
    Ok(())
}

/// Names the store reported as affected by a modify or delete.
pub fn write_affected(
    out: &mut dyn Write,
    opts: &ReportOptions,
    action: &str,
    names: &[String],
) -> io::Result<()> {
    writeln!(out, " {}", opts.painter.header(&format!("{action} clusters...")))?;
    for name in names {
        writeln!(out, "  {}", opts.painter.name(name))?;
    }
    Ok(())
}

/// Columns shown by a listing, in order.
pub fn list_columns(long: bool) -> Vec<&'static str> {
    let mut columns = vec!["Name"];
    if long {
        columns.extend(LimitField::ALL.iter().map(|f| f.label()));
    }
    columns
}

fn limit_cell(limits: &Limits, field: LimitField) -> String {
    limits.get(field).map(|v| v.to_string()).unwrap_or_default()
}

/// Render clusters returned by a query.
pub fn write_cluster_list(
    out: &mut dyn Write,
    opts: &ReportOptions,
    clusters: &[ClusterRecord],
) -> io::Result<()> {
    match opts.output {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, clusters)?;
            writeln!(out)
        }
        OutputMode::Parsable => {
            if opts.header {
                let header: String = list_columns(opts.long)
                    .iter()
                    .map(|c| format!("{c}|"))
                    .collect();
                writeln!(out, "{header}")?;
            }
            for cluster in clusters {
                let mut line = format!("{}|", cluster.name);
                if opts.long {
                    for field in LimitField::ALL {
                        line.push_str(&limit_cell(&cluster.limits, field));
                        line.push('|');
                    }
                }
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        OutputMode::Human => {
            if opts.header {
                let mut header = format!("{:<NAME_WIDTH$}", "Name");
                let mut rule = "-".repeat(NAME_WIDTH);
                if opts.long {
                    for field in LimitField::ALL {
                        header.push_str(&format!(" {:>LIMIT_WIDTH$}", field.label()));
                        rule.push(' ');
                        rule.push_str(&"-".repeat(LIMIT_WIDTH));
                    }
                }
                writeln!(out, "{}", opts.painter.header(header.trim_end()))?;
                writeln!(out, "{}", opts.painter.dim(&rule))?;
            }
            for cluster in clusters {
                let mut line = format!("{:<NAME_WIDTH$}", cluster.name);
                if opts.long {
                    for field in LimitField::ALL {
                        line.push_str(&format!(
                            " {:>LIMIT_WIDTH$}",
                            limit_cell(&cluster.limits, field)
                        ));
                    }
                }
                writeln!(out, "{}", line.trim_end())?;
            }
            Ok(())
        }
    }
}
