//! Table command implementation.
//!
//! This module prints a release table as an indented tree.

use crate::display::parse_opt_date;
use anyhow::Result;
use fredtools_lib::{ReleaseFields, RootPass, prelude::*};
use std::io::Write;

/// Print a release table.
pub(crate) fn show(
    client: &FredClient,
    release_id: i64,
    element: Option<i64>,
    values: bool,
    date: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let mut options = TableOptions {
        element_id: element.map(ElementId::new),
        ..TableOptions::default()
    };
    if values {
        options = options.with_observation_values(parse_opt_date(date)?);
    }

    let release = Release::from_fields(ReleaseId::new(release_id), ReleaseFields::default());
    let table = release.table(client, &options)?;

    if let Some(name) = table.name() {
        writeln!(out, "{name}")?;
    }
    if table.root_pass() == RootPass::Orphans {
        tracing::warn!(release_id, "Table has no declared root, showing top-level elements");
    }

    for (depth, node) in table.walk() {
        write!(out, "{:indent$}{}", "", node.element(), indent = depth * 2)?;
        if let Some(value) = &node.observation_value {
            write!(out, " = {value}")?;
            if let Some(date) = &node.observation_date {
                write!(out, " ({date})")?;
            }
        }
        writeln!(out)?;
    }

    if !table.unanchored().is_empty() {
        tracing::info!(count = table.unanchored().len(), "Elements not reachable from any root");
    }
    Ok(())
}
