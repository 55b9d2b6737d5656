//! Storage abstraction layer for tabular data I/O
//!
//! Normalizes reading and writing Arrow tables between the local filesystem
//! and S3-style object storage. One capability surface, two backends: a
//! live endpoint bound to a cloud session, or a local directory tree
//! standing in for one (emulation mode).

pub mod dataset;
pub mod local;
pub mod parquet;
pub mod path;
pub mod s3;

pub use path::{is_s3_uri, storage_key, ResolvedKey, S3_SCHEME};

use crate::storage::parquet::{ParquetReader, ParquetWriter};
use crate::{Result, StorageConfig};
use arrow::array::RecordBatch;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Storage backend selected once at construction
pub enum StorageBackend {
    /// Configured S3 builder; each operation binds the bucket named by
    /// the URI and builds the store
    Live(AmazonS3Builder),
    /// Local directory tree standing in for object storage
    Emulated {
        root: PathBuf,
        store: Arc<dyn ObjectStore>,
    },
}

/// Storage access shim over a live or emulated object-storage backend
///
/// Local paths pass straight through to Parquet file I/O; `s3://` URIs are
/// resolved against the backend. Configuration is immutable after
/// construction and every call is independent.
pub struct Storage {
    config: StorageConfig,
    backend: StorageBackend,
}

impl Storage {
    /// Construct a storage shim from explicit configuration
    pub fn new(config: StorageConfig) -> Result<Self> {
        let backend = if config.emulated {
            let root = local::resolve_emulation_root(&config.emulation_root)?;
            let store = local::create_emulated_store(&root)?;
            info!("Initialized emulated storage at {}", root.display());
            StorageBackend::Emulated { root, store }
        } else {
            let builder = s3::configure_builder(&config)?;
            info!("Initialized S3 storage (region {})", config.region);
            StorageBackend::Live(builder)
        };

        Ok(Self { config, backend })
    }

    /// Construct from the `AWS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(StorageConfig::from_env())
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Resolve an `s3://` URI to a backend storage key: the bare key on a
    /// live backend, a real filesystem path under the root in emulation
    /// mode. Fails for any URI without the scheme prefix.
    pub fn resolve_key(&self, uri: &str) -> Result<ResolvedKey> {
        let key = storage_key(uri)?;
        match &self.backend {
            StorageBackend::Live(_) => Ok(ResolvedKey::Remote(key)),
            StorageBackend::Emulated { root, .. } => Ok(ResolvedKey::Emulated(root.join(key))),
        }
    }

    /// Read a table from a local path or an `s3://` URI
    ///
    /// Remote keys are read as partition-aware datasets: a single object is
    /// read directly, a prefix is materialized with its hive-encoded
    /// partition columns attached.
    pub async fn read_table(&self, uri: &str) -> Result<RecordBatch> {
        if !is_s3_uri(uri) {
            return ParquetReader::new().read_batch(uri);
        }

        let (store, object_path) = self.object_store_for(uri)?;
        dataset::read_dataset(store.as_ref(), &object_path).await
    }

    /// Write a table to a local path or an `s3://` URI
    ///
    /// With partition columns, writes a hive-partitioned dataset under the
    /// key, overwriting only the partitions present in `batch`. Without
    /// them, writes a single object at the key.
    pub async fn write_table(
        &self,
        batch: &RecordBatch,
        uri: &str,
        partition_columns: &[&str],
    ) -> Result<()> {
        if !is_s3_uri(uri) {
            return ParquetWriter::new().write_batch(uri, batch);
        }

        let (store, object_path) = self.object_store_for(uri)?;

        if partition_columns.is_empty() {
            if let ResolvedKey::Emulated(target) = self.resolve_key(uri)? {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            dataset::write_object(store.as_ref(), &object_path, batch).await
        } else {
            dataset::write_dataset(store.as_ref(), &object_path, batch, partition_columns).await
        }
    }

    /// Bind the backend store and backend-relative object path for a URI
    fn object_store_for(&self, uri: &str) -> Result<(Arc<dyn ObjectStore>, ObjectPath)> {
        let key = storage_key(uri)?;
        match &self.backend {
            StorageBackend::Live(builder) => {
                let (bucket, rest) = s3::split_bucket(&key)?;
                let store = builder.clone().with_bucket_name(bucket).build()?;
                Ok((Arc::new(store), ObjectPath::from(rest)))
            }
            StorageBackend::Emulated { store, .. } => {
                Ok((store.clone(), ObjectPath::from(key)))
            }
        }
    }
}
