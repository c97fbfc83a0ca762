//! Series command implementation.
//!
//! This module prints the metadata of one series and, on request, the
//! categories, release and tags it belongs to.

use crate::display::field;
use anyhow::Result;
use fredtools_lib::prelude::*;
use std::io::Write;

/// Show metadata of a series.
pub(crate) fn show(
    client: &FredClient,
    id: &str,
    related: bool,
    out: &mut impl Write,
) -> Result<()> {
    let series = Series::new(client, id)?;
    let fields = series.fields();

    writeln!(out, "{series}")?;
    field(out, "Frequency", fields.frequency.as_deref())?;
    field(out, "Units", fields.units.as_deref())?;
    field(out, "Seasonal adjustment", fields.seasonal_adjustment.as_deref())?;
    field(out, "Observation start", fields.observation_start)?;
    field(out, "Observation end", fields.observation_end)?;
    field(out, "Last updated", fields.last_updated.as_deref())?;
    field(out, "Popularity", fields.popularity)?;
    if let Some(notes) = fields.notes.as_deref().filter(|n| !n.is_empty()) {
        writeln!(out, "\n{notes}")?;
    }

    if !related {
        return Ok(());
    }

    let release = series.release(client, &RealtimeWindow::default())?;
    writeln!(out, "\nRelease: {release}")?;

    let categories = series.categories(client, &RealtimeWindow::default())?;
    writeln!(out, "Categories:")?;
    for category in &categories {
        writeln!(out, "  {category}")?;
    }

    let tags = series.tags(client, &ListOptions::default())?;
    let names: Vec<&str> = tags.iter().map(Tag::name).collect();
    writeln!(out, "Tags: {}", names.join(", "))?;
    Ok(())
}
