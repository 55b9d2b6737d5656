//! Live S3/MinIO storage backend
//!
//! Builds a configured `AmazonS3Builder` once at construction; each
//! operation binds it to the bucket named by the URI. Credential resolution
//! and validation stay with the SDK: explicit keys win, otherwise the SDK's
//! environment lookup applies.

use crate::{Error, Result, StorageConfig};
use object_store::aws::AmazonS3Builder;
use object_store::ClientOptions;
use url::Url;

/// Assemble the S3 builder from the configuration
pub fn configure_builder(config: &StorageConfig) -> Result<AmazonS3Builder> {
    let mut builder = AmazonS3Builder::from_env().with_region(config.region.clone());

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }
    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    let mut options = ClientOptions::new();
    if !config.verify_tls {
        options = options.with_allow_invalid_certificates(true);
    }
    if let Some(endpoint) = &config.endpoint {
        let url = Url::parse(endpoint)
            .map_err(|e| Error::Other(format!("invalid endpoint URL '{}': {}", endpoint, e)))?;
        // Local MinIO/localstack endpoints speak plain HTTP
        if url.scheme() == "http" {
            options = options.with_allow_http(true);
        }
        builder = builder.with_endpoint(endpoint);
    }

    Ok(builder.with_client_options(options))
}

/// Split a storage key into bucket and bucket-relative key
/// (`bucket/a/b` -> (`bucket`, `a/b`))
pub fn split_bucket(key: &str) -> Result<(String, String)> {
    let (bucket, rest) = match key.split_once('/') {
        Some((bucket, rest)) => (bucket, rest),
        None => (key, ""),
    };

    if bucket.is_empty() {
        return Err(Error::Other(format!("S3 URI missing bucket: '{}'", key)));
    }

    Ok((bucket.to_string(), rest.trim_start_matches('/').to_string()))
}
