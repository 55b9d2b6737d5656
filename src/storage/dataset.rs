//! Partition-aware dataset I/O over an ObjectStore
//!
//! Datasets use hierarchical partition encoding: one `column=value` path
//! segment per partition column, one `part-0.parquet` data file per
//! partition. Reading discovers partitions from the directory layout and
//! re-attaches them as columns after the file columns; writing splits a
//! table by its partition values and overwrites only the partitions
//! touched.

use crate::storage::parquet::{ParquetReader, ParquetWriter};
use crate::{Error, Result};
use arrow::array::{Array, AsArray, Int32Array, RecordBatch, RecordBatchOptions, StringArray, UInt32Array};
use arrow::datatypes::{
    DataType, Field, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, Schema,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectMeta, ObjectStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Hive's marker segment for a null partition value
const NULL_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

const PART_FILE: &str = "part-0.parquet";

/// Write a table as a single Parquet object
pub async fn write_object(
    store: &dyn ObjectStore,
    path: &ObjectPath,
    batch: &RecordBatch,
) -> Result<()> {
    let data = ParquetWriter::new().encode_batch(batch)?;
    store.put(path, Bytes::from(data).into()).await?;

    info!("Wrote Parquet object: {} ({} rows)", path, batch.num_rows());
    Ok(())
}

/// Write a table as a hive-partitioned dataset under `base`
///
/// Partition columns are dropped from the data files; their values live in
/// the path segments. Partitions not present in the batch are left alone.
pub async fn write_dataset(
    store: &dyn ObjectStore,
    base: &ObjectPath,
    batch: &RecordBatch,
    partition_columns: &[&str],
) -> Result<()> {
    let schema = batch.schema();

    let mut partition_indices = Vec::with_capacity(partition_columns.len());
    for name in partition_columns {
        partition_indices.push(schema.index_of(name)?);
    }

    // Group row indices by their partition value tuple
    let mut groups: BTreeMap<Vec<Option<String>>, Vec<u32>> = BTreeMap::new();
    for row in 0..batch.num_rows() {
        let key = partition_indices
            .iter()
            .map(|&i| partition_value(batch.column(i).as_ref(), row))
            .collect::<Result<Vec<_>>>()?;
        groups.entry(key).or_default().push(row as u32);
    }

    let keep: Vec<usize> = (0..schema.fields().len())
        .filter(|i| !partition_indices.contains(i))
        .collect();
    let file_schema = Arc::new(Schema::new(
        keep.iter()
            .map(|&i| schema.field(i).clone())
            .collect::<Vec<Field>>(),
    ));

    let writer = ParquetWriter::new();
    let num_partitions = groups.len();

    for (values, rows) in groups {
        let indices = UInt32Array::from(rows.clone());
        let columns = keep
            .iter()
            .map(|&i| arrow::compute::take(batch.column(i).as_ref(), &indices, None))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let part_batch = RecordBatch::try_new_with_options(
            file_schema.clone(),
            columns,
            &RecordBatchOptions::new().with_row_count(Some(rows.len())),
        )?;

        let mut segments = Vec::new();
        if !base.as_ref().is_empty() {
            segments.push(base.as_ref().to_string());
        }
        for (name, value) in partition_columns.iter().zip(&values) {
            segments.push(format!(
                "{}={}",
                name,
                value.as_deref().unwrap_or(NULL_PARTITION)
            ));
        }
        segments.push(PART_FILE.to_string());
        let path = ObjectPath::from(segments.join("/"));

        debug!("Writing partition {} ({} rows)", path, rows.len());
        let data = writer.encode_batch(&part_batch)?;
        store.put(&path, Bytes::from(data).into()).await?;
    }

    info!(
        "Wrote partitioned dataset: {} ({} partitions, {} rows)",
        base,
        num_partitions,
        batch.num_rows()
    );
    Ok(())
}

/// Materialize a Parquet dataset at `prefix` into a single RecordBatch
///
/// A key naming a single object is read directly. Otherwise every
/// `.parquet` object under the prefix is read and hive-encoded path
/// segments become partition columns appended after the file columns.
pub async fn read_dataset(store: &dyn ObjectStore, prefix: &ObjectPath) -> Result<RecordBatch> {
    if store.head(prefix).await.is_ok() {
        let data = store.get(prefix).await?.bytes().await?;
        return ParquetReader::new().read_bytes(data);
    }

    let mut objects: Vec<ObjectMeta> = store.list(Some(prefix)).try_collect().await?;
    objects.sort_by(|a, b| a.location.as_ref().cmp(b.location.as_ref()));

    let reader = ParquetReader::new();
    let mut batches = Vec::new();
    let mut partitions: Vec<Vec<(String, Option<String>)>> = Vec::new();

    for object in &objects {
        let Some(parts) = object.location.prefix_match(prefix) else {
            continue;
        };
        let segments: Vec<String> = parts.map(|p| p.as_ref().to_string()).collect();
        let Some((filename, dirs)) = segments.split_last() else {
            continue;
        };
        if !filename.ends_with(".parquet") {
            continue;
        }

        let mut values = Vec::with_capacity(dirs.len());
        for segment in dirs {
            let Some((column, value)) = segment.split_once('=') else {
                return Err(Error::Other(format!(
                    "unrecognized partition segment '{}' in '{}'",
                    segment, object.location
                )));
            };
            let value = (value != NULL_PARTITION).then(|| value.to_string());
            values.push((column.to_string(), value));
        }

        debug!("Reading dataset file: {}", object.location);
        let data = store.get(&object.location).await?.bytes().await?;
        batches.push(reader.read_bytes(data)?);
        partitions.push(values);
    }

    if batches.is_empty() {
        return Err(Error::Other(format!(
            "no Parquet data found under '{}'",
            prefix
        )));
    }

    let augmented = attach_partition_columns(batches, &partitions)?;
    let schema = augmented[0].schema();
    let combined = arrow::compute::concat_batches(&schema, &augmented)?;

    info!(
        "Read dataset: {} ({} files, {} rows)",
        prefix,
        partitions.len(),
        combined.num_rows()
    );
    Ok(combined)
}

/// Append discovered partition values as columns on each file's batch
fn attach_partition_columns(
    batches: Vec<RecordBatch>,
    partitions: &[Vec<(String, Option<String>)>],
) -> Result<Vec<RecordBatch>> {
    let names: Vec<String> = partitions[0].iter().map(|(name, _)| name.clone()).collect();
    for file_values in partitions {
        let file_names: Vec<&String> = file_values.iter().map(|(name, _)| name).collect();
        if file_names.len() != names.len() || !file_names.iter().zip(&names).all(|(a, b)| *a == b) {
            return Err(Error::Other(format!(
                "inconsistent partition structure: expected columns [{}]",
                names.join(", ")
            )));
        }
    }

    if names.is_empty() {
        return Ok(batches);
    }

    // Per-column values across files decide the materialized type
    let typed_columns: Vec<(String, Vec<Option<String>>)> = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let values = partitions.iter().map(|p| p[j].1.clone()).collect();
            (name.clone(), values)
        })
        .collect();

    let mut result = Vec::with_capacity(batches.len());
    for (i, batch) in batches.into_iter().enumerate() {
        let rows = batch.num_rows();
        let mut fields: Vec<Field> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone())
            .collect();
        let mut columns = batch.columns().to_vec();

        for (name, values) in &typed_columns {
            let value = &values[i];
            match infer_partition_type(values) {
                DataType::Int32 => {
                    let parsed = value.as_deref().and_then(|v| v.parse::<i32>().ok());
                    fields.push(Field::new(name, DataType::Int32, true));
                    columns.push(Arc::new(Int32Array::from(vec![parsed; rows])));
                }
                _ => {
                    fields.push(Field::new(name, DataType::Utf8, true));
                    columns.push(Arc::new(StringArray::from(vec![value.clone(); rows])));
                }
            }
        }

        result.push(RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            columns,
            &RecordBatchOptions::new().with_row_count(Some(rows)),
        )?);
    }

    Ok(result)
}

/// Int32 when every non-null value parses as one, Utf8 otherwise
fn infer_partition_type(values: &[Option<String>]) -> DataType {
    let all_int = values
        .iter()
        .flatten()
        .all(|v| v.parse::<i32>().is_ok());
    if all_int {
        DataType::Int32
    } else {
        DataType::Utf8
    }
}

/// Render one row of a partition column as a path-segment value
fn partition_value(array: &dyn Array, row: usize) -> Result<Option<String>> {
    if array.is_null(row) {
        return Ok(None);
    }

    let value = match array.data_type() {
        DataType::Utf8 => array.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => array.as_string::<i64>().value(row).to_string(),
        DataType::Boolean => array.as_boolean().value(row).to_string(),
        DataType::Int8 => array.as_primitive::<Int8Type>().value(row).to_string(),
        DataType::Int16 => array.as_primitive::<Int16Type>().value(row).to_string(),
        DataType::Int32 => array.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => array.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::UInt8 => array.as_primitive::<UInt8Type>().value(row).to_string(),
        DataType::UInt16 => array.as_primitive::<UInt16Type>().value(row).to_string(),
        DataType::UInt32 => array.as_primitive::<UInt32Type>().value(row).to_string(),
        DataType::UInt64 => array.as_primitive::<UInt64Type>().value(row).to_string(),
        DataType::Float32 => array.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => array.as_primitive::<Float64Type>().value(row).to_string(),
        other => {
            return Err(Error::Other(format!(
                "unsupported partition column type: {}",
                other
            )))
        }
    };

    Ok(Some(value))
}
