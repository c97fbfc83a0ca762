//! Display utilities and output formatting for the fredtools CLI.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use fredtools_lib::{DATE_FORMAT, Observation, OutputFormat, Series};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for exported observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the writer behind this format.
    pub(crate) const fn output_format(self) -> OutputFormat {
        match self {
            Self::Csv => OutputFormat::Csv,
            Self::Tsv => OutputFormat::Tsv,
            Self::Json => OutputFormat::Json,
            Self::Ndjson => OutputFormat::Ndjson,
            Self::Parquet => OutputFormat::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output_format().extension())
    }
}

/// Parse a `YYYY-MM-DD` command line date.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .with_context(|| format!("Invalid date: {raw}. Expected YYYY-MM-DD"))
}

/// Parse an optional command line date.
pub(crate) fn parse_opt_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(parse_date).transpose()
}

/// Write observations to a file, or to stdout when no path is given.
pub(crate) fn write_observations(
    observations: &[Observation],
    output: Option<&Path>,
    format: Format,
) -> Result<()> {
    let format = format.output_format();
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            format.write_observations(observations, &mut writer)?;
            writer.flush()?;
        }
        None => {
            if format.is_binary() {
                bail!("{format} output needs a file. Pass --output");
            }
            let mut writer = BufWriter::new(std::io::stdout());
            format.write_observations(observations, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Print a single series line for listings.
pub(crate) fn series_row(out: &mut impl Write, series: &Series) -> Result<()> {
    let fields = series.fields();
    writeln!(
        out,
        "{:<20} {:<6} {:<8} {}",
        series.id().as_str(),
        fields.frequency_short.as_deref().unwrap_or("-"),
        fields.seasonal_adjustment_short.as_deref().unwrap_or("-"),
        series.title().unwrap_or(""),
    )?;
    Ok(())
}

/// Print the header matching [`series_row`].
pub(crate) fn series_header(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<20} {:<6} {:<8} TITLE", "ID", "FREQ", "SA")?;
    writeln!(out, "{}", "-".repeat(60))?;
    Ok(())
}

/// Print a labelled value, skipping unknown ones.
pub(crate) fn field(
    out: &mut impl Write,
    label: &str,
    value: Option<impl std::fmt::Display>,
) -> Result<()> {
    if let Some(value) = value {
        writeln!(out, "{:<20} {}", format!("{label}:"), value)?;
    }
    Ok(())
}
