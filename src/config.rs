//! Connection configuration for the storage shim
//!
//! Captured once at construction and immutable afterwards. The same struct
//! drives both the live S3 backend and the local emulation backend; the
//! `emulated` flag selects between them.

use std::env;
use std::path::PathBuf;

pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Region used when neither the configuration nor the environment names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Storage endpoint configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Named credentials profile. Recorded for session setup; credential
    /// file resolution stays with the SDK's environment lookup.
    pub profile: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Custom endpoint URL (MinIO, localstack). `http://` endpoints are
    /// allowed to skip TLS entirely.
    pub endpoint: Option<String>,
    pub region: String,
    /// Disable to accept self-signed certificates on custom endpoints
    pub verify_tls: bool,
    /// Redirect all object-storage calls into `emulation_root` instead of
    /// a live endpoint
    pub emulated: bool,
    /// Directory standing in for object storage in emulation mode.
    /// `~` expands to the user's home directory.
    pub emulation_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profile: None,
            access_key: None,
            secret_key: None,
            endpoint: None,
            region: DEFAULT_REGION.to_string(),
            verify_tls: true,
            emulated: false,
            emulation_root: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl StorageConfig {
    /// Build a configuration from the `AWS_*` environment variables,
    /// defaulting the region when `AWS_DEFAULT_REGION` is unset.
    pub fn from_env() -> Self {
        Self {
            profile: env::var(AWS_PROFILE).ok(),
            access_key: env::var(AWS_ACCESS_KEY_ID).ok(),
            secret_key: env::var(AWS_SECRET_ACCESS_KEY).ok(),
            endpoint: env::var(AWS_ENDPOINT_URL).ok(),
            region: env::var(AWS_DEFAULT_REGION).unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            ..Self::default()
        }
    }
}
