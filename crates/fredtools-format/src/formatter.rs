//! Output format abstraction.

use fredtools_types::Observation;
use std::io::Write;
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter};

/// Column names shared by every format, in output order.
pub const COLUMNS: [&str; 4] = ["realtime_start", "realtime_end", "date", "value"];

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all formats, including ones not compiled in.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Tsv, Self::Json, Self::Ndjson, Self::Parquet]
    }

    /// Returns true if this build can write the format.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        match self {
            Self::Parquet => cfg!(feature = "parquet"),
            Self::Csv | Self::Tsv | Self::Json | Self::Ndjson => true,
        }
    }

    /// Returns true for formats that are not text.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Parquet)
    }

    /// Writes observations with the default formatter for this format.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Unavailable`] for Parquet when the `parquet`
    /// feature is disabled, before anything is written. Otherwise returns
    /// the formatter's error.
    pub fn write_observations<W: Write + Send>(
        &self,
        observations: &[Observation],
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_observations(observations, writer),
            Self::Tsv => CsvFormatter::tsv().write_observations(observations, writer),
            Self::Json => JsonFormatter::new().write_observations(observations, writer),
            Self::Ndjson => JsonFormatter::ndjson().write_observations(observations, writer),
            #[cfg(feature = "parquet")]
            Self::Parquet => {
                crate::ParquetFormatter::new().write_observations(observations, writer)
            }
            #[cfg(not(feature = "parquet"))]
            Self::Parquet => {
                drop(writer);
                Err(FormatError::Unavailable("parquet"))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// The format needs a cargo feature this build was compiled without.
    #[error("{0} support not compiled in (enable the `{0}` feature)")]
    Unavailable(&'static str),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes observations to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_observations<W: Write + Send>(
        &self,
        observations: &[Observation],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert_eq!("pq".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
        assert!(matches!(
            "xlsx".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_extension_round_trips_through_display() {
        for format in OutputFormat::all() {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_text_formats_always_available() {
        assert!(OutputFormat::Csv.is_available());
        assert!(OutputFormat::Ndjson.is_available());
        assert_eq!(OutputFormat::Parquet.is_available(), cfg!(feature = "parquet"));
    }

    #[cfg(not(feature = "parquet"))]
    #[test]
    fn test_parquet_unavailable_writes_nothing() {
        let mut output = Vec::new();
        let err = OutputFormat::Parquet
            .write_observations(&[], &mut output)
            .unwrap_err();
        assert!(matches!(err, FormatError::Unavailable("parquet")));
        assert!(output.is_empty());
    }
}
