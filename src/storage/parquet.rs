//! Single-file Parquet I/O
//!
//! Moves whole tables between `RecordBatch` and Parquet, either directly on
//! the local filesystem or through an in-memory buffer for object-storage
//! puts/gets. Snappy compression, dictionary encoding, page statistics.

use crate::Result;
use arrow::array::{RecordBatch, RecordBatchReader};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use parquet::file::reader::ChunkReader;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Parquet file writer with Snappy compression
pub struct ParquetWriter {
    properties: WriterProperties,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self::with_compression(Compression::SNAPPY)
    }

    pub fn with_compression(compression: Compression) -> Self {
        let properties = WriterProperties::builder()
            .set_compression(compression)
            .set_dictionary_enabled(true)
            .set_statistics_enabled(parquet::file::properties::EnabledStatistics::Page)
            .build();

        Self { properties }
    }

    /// Write a RecordBatch to a Parquet file on the local filesystem
    pub fn write_batch<P: AsRef<Path>>(&self, path: P, batch: &RecordBatch) -> Result<()> {
        let path = path.as_ref();
        debug!(
            "Writing RecordBatch to Parquet: {} ({} rows, {} columns)",
            path.display(),
            batch.num_rows(),
            batch.num_columns()
        );

        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(self.properties.clone()))?;
        writer.write(batch)?;
        writer.close()?;

        info!(
            "Wrote Parquet file: {} ({} bytes)",
            path.display(),
            std::fs::metadata(path)?.len()
        );

        Ok(())
    }

    /// Serialize a RecordBatch into an in-memory Parquet buffer
    pub fn encode_batch(&self, batch: &RecordBatch) -> Result<Vec<u8>> {
        let mut writer =
            ArrowWriter::try_new(Vec::new(), batch.schema(), Some(self.properties.clone()))?;
        writer.write(batch)?;
        Ok(writer.into_inner()?)
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parquet file reader
pub struct ParquetReader;

impl ParquetReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a local Parquet file into a single RecordBatch
    pub fn read_batch<P: AsRef<Path>>(&self, path: P) -> Result<RecordBatch> {
        let path = path.as_ref();
        debug!("Reading Parquet file: {}", path.display());

        let batch = self.read_from(File::open(path)?)?;

        info!(
            "Read Parquet file: {} ({} rows, {} columns)",
            path.display(),
            batch.num_rows(),
            batch.num_columns()
        );

        Ok(batch)
    }

    /// Read a fetched Parquet object into a single RecordBatch
    pub fn read_bytes(&self, data: Bytes) -> Result<RecordBatch> {
        self.read_from(data)
    }

    fn read_from<R: ChunkReader + 'static>(&self, reader: R) -> Result<RecordBatch> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mut reader = builder.build()?;

        let mut batches = Vec::new();
        for batch in reader.by_ref() {
            batches.push(batch?);
        }

        if batches.is_empty() {
            // Empty file: preserve the schema with zero rows
            return Ok(RecordBatch::new_empty(reader.schema()));
        }

        let schema = batches[0].schema();
        Ok(arrow::compute::concat_batches(&schema, &batches)?)
    }
}

impl Default for ParquetReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, false),
            Field::new("score", DataType::Float64, true),
        ]));

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec!["Alice", "Bob", "Charlie"])),
                Arc::new(Float64Array::from(vec![Some(95.5), None, Some(88.8)])),
            ],
        )
        .expect("Failed to create test batch")
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.parquet");

        let original = create_test_batch();
        ParquetWriter::new().write_batch(&file_path, &original).unwrap();

        let read = ParquetReader::new().read_batch(&file_path).unwrap();
        assert_eq!(original.schema(), read.schema());
        assert_eq!(original, read);
    }

    #[test]
    fn test_buffer_round_trip() {
        let original = create_test_batch();
        let buf = ParquetWriter::new().encode_batch(&original).unwrap();
        assert!(!buf.is_empty());

        let read = ParquetReader::new().read_bytes(Bytes::from(buf)).unwrap();
        assert_eq!(original, read);
    }

    #[test]
    fn test_read_nonexistent_file() {
        assert!(ParquetReader::new()
            .read_batch("/nonexistent/file.parquet")
            .is_err());
    }

    #[test]
    fn test_empty_batch_round_trip() {
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int32, false)]));
        let empty = RecordBatch::try_new(
            schema,
            vec![Arc::new(Int32Array::from(Vec::<i32>::new()))],
        )
        .unwrap();

        let buf = ParquetWriter::new().encode_batch(&empty).unwrap();
        let read = ParquetReader::new().read_bytes(Bytes::from(buf)).unwrap();

        assert_eq!(read.num_rows(), 0);
        assert_eq!(read.num_columns(), 1);
    }
}
