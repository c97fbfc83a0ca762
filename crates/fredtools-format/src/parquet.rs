//! Apache Parquet output format.

use arrow::array::{Date32Array, Float64Array};
use arrow::datatypes::{DataType, Date32Type, Field, Schema};
use arrow::record_batch::RecordBatch;
use fredtools_types::Observation;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// Returns the Arrow schema for observations.
#[must_use]
pub fn observation_schema() -> Schema {
    Schema::new(vec![
        Field::new("realtime_start", DataType::Date32, false),
        Field::new("realtime_end", DataType::Date32, false),
        Field::new("date", DataType::Date32, false),
        Field::new("value", DataType::Float64, true),
    ])
}

/// Converts observations into an Arrow record batch. Missing readings
/// become nulls in the `value` column.
///
/// # Errors
///
/// Returns [`FormatError::Parquet`] if Arrow rejects the batch.
pub fn record_batch(observations: &[Observation]) -> Result<RecordBatch, FormatError> {
    let dates = |pick: fn(&Observation) -> chrono::NaiveDate| {
        Date32Array::from_iter_values(
            observations
                .iter()
                .map(|o| Date32Type::from_naive_date(pick(o))),
        )
    };
    let values: Float64Array = observations
        .iter()
        .map(|o| (!o.is_missing()).then_some(o.value))
        .collect();

    RecordBatch::try_new(
        Arc::new(observation_schema()),
        vec![
            Arc::new(dates(|o: &Observation| o.realtime_start)),
            Arc::new(dates(|o: &Observation| o.realtime_end)),
            Arc::new(dates(|o: &Observation| o.date)),
            Arc::new(values),
        ],
    )
    .map_err(|e| FormatError::Parquet(e.to_string()))
}

impl Formatter for ParquetFormatter {
    fn write_observations<W: Write + Send>(
        &self,
        observations: &[Observation],
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(observation_schema());
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in observations.chunks(self.row_group_size.max(1)) {
            let batch = record_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn create_test_observations() -> Vec<Observation> {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        vec![
            Observation::new(day, day, day, 3.25),
            Observation::new(day, day, day, f64::NAN),
        ]
    }

    #[test]
    fn test_parquet_observations() {
        let formatter = ParquetFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_observations(&create_test_observations(), &mut output)
            .unwrap();

        // "PAR1" magic
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_observation_schema() {
        let schema = observation_schema();
        assert_eq!(schema.fields().len(), 4);
        assert!(schema.field_with_name("realtime_start").is_ok());
        assert!(schema.field_with_name("value").unwrap().is_nullable());
    }

    #[test]
    fn test_record_batch_maps_missing_to_null() {
        let batch = record_batch(&create_test_observations()).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 4);

        let values = batch
            .column(3)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(values.value(0), 3.25);
        assert!(values.is_null(1));

        let dates = batch
            .column(2)
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        assert_eq!(
            dates.value_as_date(0),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obs.parquet");
        let file = std::fs::File::create(&path).unwrap();

        ParquetFormatter::new()
            .write_observations(&create_test_observations(), file)
            .unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() > 4);
    }
}
