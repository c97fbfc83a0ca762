//! CSV output format.

use fredtools_types::{DATE_FORMAT, Observation};
use std::io::Write;

use crate::{COLUMNS, FormatError, Formatter};

/// CSV formatter.
///
/// Missing readings are written as empty cells.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_observations<W: Write + Send>(
        &self,
        observations: &[Observation],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "{}", COLUMNS.join(d.to_string().as_str()))?;
        }

        for observation in observations {
            write!(
                writer,
                "{}{d}{}{d}{}{d}",
                observation.realtime_start.format(DATE_FORMAT),
                observation.realtime_end.format(DATE_FORMAT),
                observation.date.format(DATE_FORMAT),
            )?;
            if observation.is_missing() {
                writeln!(writer)?;
            } else {
                writeln!(writer, "{}", observation.value)?;
            }
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
