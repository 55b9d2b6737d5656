// lakeview - storage shim and column exploration for Arrow tables
//
// Two independent layers: a storage-access shim that reads and writes
// Parquet tables against the local filesystem, a live S3 endpoint, or a
// local emulation of one; and schema-driven column exploration helpers.

pub mod config;
pub mod error;
pub mod explore;
pub mod storage;

// Public API
pub use config::StorageConfig;
pub use error::{Error, Result};
pub use storage::{is_s3_uri, ResolvedKey, Storage};
