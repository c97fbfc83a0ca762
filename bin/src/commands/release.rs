//! Release command implementation.
//!
//! This module prints a release and, on request, its publication dates,
//! sources and series.

use crate::display::{field, series_header, series_row};
use anyhow::Result;
use fredtools_lib::{DatesOptions, prelude::*};
use std::io::Write;

/// Optional sections of the release listing.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Sections {
    pub(crate) dates: bool,
    pub(crate) sources: bool,
    pub(crate) series: bool,
}

/// Show a release.
pub(crate) fn show(
    client: &FredClient,
    id: i64,
    sections: &Sections,
    out: &mut impl Write,
) -> Result<()> {
    let release = Release::new(client, ReleaseId::new(id))?;
    let fields = release.fields();

    writeln!(out, "{release}")?;
    field(out, "Press release", fields.press_release)?;
    field(out, "Link", fields.link.as_deref())?;
    field(out, "Realtime start", fields.realtime_start)?;
    field(out, "Realtime end", fields.realtime_end)?;

    if sections.dates {
        let dates = release.dates(client, &DatesOptions::default())?;
        writeln!(out, "\nDates ({}):", dates.len())?;
        for date in &dates {
            writeln!(out, "  {date}")?;
        }
    }

    if sections.sources {
        let sources = release.sources(client, &RealtimeWindow::default())?;
        writeln!(out, "\nSources:")?;
        for source in &sources {
            writeln!(out, "  {source}")?;
        }
    }

    if sections.series {
        let series = release.series(client, &ListOptions::default())?;
        writeln!(out)?;
        series_header(out)?;
        for s in &series {
            series_row(out, s)?;
        }
    }
    Ok(())
}
