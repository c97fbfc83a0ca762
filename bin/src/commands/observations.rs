//! Observations command implementation.
//!
//! This module fetches the observations of a series and writes them in the
//! requested format.

use crate::display::{Format, parse_opt_date, write_observations};
use anyhow::{Result, bail};
use fredtools_lib::prelude::*;
use std::path::Path;

/// Observation filters taken from the command line.
#[derive(Debug, Default)]
pub(crate) struct Filter<'a> {
    pub(crate) start: Option<&'a str>,
    pub(crate) end: Option<&'a str>,
    pub(crate) units: Option<&'a str>,
    pub(crate) frequency: Option<&'a str>,
}

impl Filter<'_> {
    /// Converts the filters into request options.
    fn options(&self) -> Result<ObservationOptions> {
        let start = parse_opt_date(self.start)?;
        let end = parse_opt_date(self.end)?;
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            bail!("Start date {start} is after end date {end}");
        }

        let mut options = ObservationOptions::default().between(start, end);
        if let Some(units) = self.units {
            options = options.with_units(units);
        }
        if let Some(frequency) = self.frequency {
            options = options.with_frequency(frequency);
        }
        Ok(options)
    }
}

/// Export the observations of a series.
pub(crate) fn export(
    client: &FredClient,
    id: &str,
    filter: &Filter<'_>,
    output: Option<&Path>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let options = filter.options()?;
    let series = Series::from_fields(id, fredtools_lib::SeriesFields::default())?;
    let observations = series.observations(client, &options)?;
    tracing::info!(
        series_id = id,
        count = observations.len(),
        missing = observations.missing_count(),
        "Fetched observations"
    );

    write_observations(&observations, output, format)?;

    if let Some(path) = output
        && !quiet
    {
        eprintln!("Wrote {} observations to {}", observations.len(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fredtools_lib::mock::{StubResponse, StubTransport};
    use serde_json::json;

    #[test]
    fn test_export_to_file() {
        let stub = StubTransport::new([StubResponse::new(
            "series/observations",
            json!({ "observations": [
                { "realtime_start": "2024-01-01", "realtime_end": "2024-01-01", "date": "2023-01-01", "value": "3.4" },
                { "realtime_start": "2024-01-01", "realtime_end": "2024-01-01", "date": "2023-02-01", "value": "." }
            ] }),
        )
        .expect_param("series_id", "UNRATE")
        .expect_param("observation_start", "2023-01-01")
        .expect_param("units", "pch")
        .expect_absent("observation_end")]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unrate.ndjson");
        let filter = Filter {
            start: Some("2023-01-01"),
            units: Some("pch"),
            ..Filter::default()
        };
        export(&stub.client(), "UNRATE", &filter, Some(path.as_path()), Format::Ndjson, true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<serde_json::Value> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["value"], json!(3.4));
        assert_eq!(rows[1]["value"], serde_json::Value::Null);
        stub.assert_complete();
    }

    #[test]
    fn test_reversed_range_rejected() {
        let filter = Filter {
            start: Some("2024-01-01"),
            end: Some("2023-01-01"),
            ..Filter::default()
        };
        assert!(filter.options().is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let filter = Filter {
            end: Some("yesterday"),
            ..Filter::default()
        };
        assert!(filter.options().unwrap_err().to_string().contains("yesterday"));
    }
}
