//! Local-emulation storage backend
//!
//! Stands in for object storage during development and testing: every
//! bucket/key pair maps to a file under the emulation root directory.

use crate::Result;
use object_store::local::LocalFileSystem;
use object_store::ObjectStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Expand a leading `~` and absolutize the emulation root
pub fn resolve_emulation_root(root: &Path) -> Result<PathBuf> {
    let expanded = match root.to_str() {
        Some("~") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        Some(s) if s.starts_with("~/") => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&s[2..]),
        _ => root.to_path_buf(),
    };
    Ok(std::path::absolute(expanded)?)
}

/// Create a local filesystem ObjectStore rooted at the emulation directory
pub fn create_emulated_store<P: AsRef<Path>>(root: P) -> Result<Arc<dyn ObjectStore>> {
    std::fs::create_dir_all(root.as_ref())?;

    let local_fs = LocalFileSystem::new_with_prefix(root.as_ref())?;
    Ok(Arc::new(local_fs))
}
