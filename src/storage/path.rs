//! Logical URI classification and storage-key resolution
//!
//! Every storage-directed call takes an `s3://` URI so that the same code
//! runs unchanged against a live endpoint or the local emulation tree.
//! Anything without the scheme prefix is a plain local filesystem path.

use crate::{Error, Result};
use std::path::PathBuf;

/// Reserved scheme prefix for object-storage locations
pub const S3_SCHEME: &str = "s3://";

/// Returns true if the string names an object-storage location
pub fn is_s3_uri(uri: &str) -> bool {
    uri.starts_with(S3_SCHEME)
}

/// Strip the scheme prefix and leading separators to get a backend-relative
/// key (`s3://bucket/a/b` -> `bucket/a/b`).
///
/// Fails with an invalid-argument error when the prefix is missing; backend
/// absolute paths are never accepted here.
pub fn storage_key(uri: &str) -> Result<String> {
    let Some(stripped) = uri.strip_prefix(S3_SCHEME) else {
        return Err(Error::InvalidUri(uri.to_string()));
    };
    Ok(stripped.trim_start_matches('/').to_string())
}

/// A storage key resolved against the active backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedKey {
    /// Backend-relative key on a live endpoint
    Remote(String),
    /// Real filesystem path under the emulation root
    Emulated(PathBuf),
}

impl ResolvedKey {
    pub fn as_str(&self) -> String {
        match self {
            ResolvedKey::Remote(key) => key.clone(),
            ResolvedKey::Emulated(path) => path.display().to_string(),
        }
    }
}
