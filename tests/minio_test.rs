//! Integration tests against a live S3-compatible endpoint
//!
//! These require MinIO to be running locally:
//! ```
//! docker run -p 9000:9000 minio/minio server /data
//! ```
//!
//! MinIO configuration:
//! - Endpoint: http://localhost:9000
//! - Access Key: minioadmin
//! - Secret Key: minioadmin
//! - Bucket: lakeview-test (must exist)

use arrow::array::{AsArray, Int32Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use lakeview::{Storage, StorageConfig};
use std::env;
use std::sync::Arc;

/// Helper to check if MinIO is available
async fn is_minio_available() -> bool {
    if env::var("SKIP_S3_TESTS").is_ok() {
        return false;
    }

    let endpoint =
        env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());

    match reqwest::get(format!("{}/minio/health/live", endpoint)).await {
        Ok(resp) if resp.status().is_success() => true,
        _ => {
            eprintln!("MinIO is not accessible at {}", endpoint);
            false
        }
    }
}

fn minio_storage() -> (Storage, String) {
    let endpoint =
        env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());
    let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
    let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
    let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "lakeview-test".to_string());

    let storage = Storage::new(StorageConfig {
        access_key: Some(access_key),
        secret_key: Some(secret_key),
        endpoint: Some(endpoint),
        ..Default::default()
    })
    .expect("Failed to create S3 storage");

    (storage, bucket)
}

fn create_test_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int32, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from(vec![1, 2, 3])),
            Arc::new(StringArray::from(vec!["Alice", "Bob", "Charlie"])),
            Arc::new(StringArray::from(vec!["east", "west", "east"])),
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn test_s3_round_trip() {
    if !is_minio_available().await {
        eprintln!("Skipping S3 test: MinIO not available (set MINIO_ENDPOINT to enable)");
        return;
    }

    let (storage, bucket) = minio_storage();
    let uri = format!("s3://{}/round_trip_{}/data.parquet", bucket, uuid::Uuid::new_v4());

    let original = create_test_batch();
    storage.write_table(&original, &uri, &[]).await.unwrap();

    let read = storage.read_table(&uri).await.unwrap();
    assert_eq!(original.schema(), read.schema());
    assert_eq!(original, read);
}

#[tokio::test]
async fn test_s3_partitioned_round_trip() {
    if !is_minio_available().await {
        eprintln!("Skipping S3 test: MinIO not available (set MINIO_ENDPOINT to enable)");
        return;
    }

    let (storage, bucket) = minio_storage();
    let uri = format!("s3://{}/partitioned_{}", bucket, uuid::Uuid::new_v4());

    let original = create_test_batch();
    storage
        .write_table(&original, &uri, &["region"])
        .await
        .unwrap();

    let read = storage.read_table(&uri).await.unwrap();
    assert_eq!(read.num_rows(), original.num_rows());

    let schema = read.schema();
    let regions = read
        .column(schema.index_of("region").unwrap())
        .as_string::<i32>();
    let east = (0..read.num_rows())
        .filter(|&i| regions.value(i) == "east")
        .count();
    assert_eq!(east, 2);
}
