//! The temporary merged document

use std::path::{Path, PathBuf};
use tempfile::TempPath;
use crate::cleanup::CleanupRegistry;
use crate::error::Result;

/// A uniquely named temp PDF owned by one run.
///
/// The file is deleted when this value is dropped, and is tracked by the
/// [`CleanupRegistry`] for as long as it lives.
#[derive(Debug)]
pub struct MergedDocument {
    path: PathBuf,
    temp: Option<TempPath>,
    registry: CleanupRegistry,
}

impl MergedDocument {
    /// Create an empty `batch-print-*.pdf` in the system temp directory.
    pub fn create(registry: &CleanupRegistry) -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix("batch-print-")
            .suffix(".pdf")
            .tempfile()?
            .into_temp_path();
        registry.register(&temp);
        log::debug!("created temp document {}", temp.display());

        Ok(Self {
            path: temp.to_path_buf(),
            temp: Some(temp),
            registry: registry.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MergedDocument {
    fn drop(&mut self) {
        // Delete before unregistering so an interrupt in between still finds it
        log::debug!("removing temp document {}", self.path.display());
        if let Some(temp) = self.temp.take() {
            if let Err(e) = temp.close() {
                log::warn!("Failed to remove {}: {}", self.path.display(), e);
            }
        }
        self.registry.unregister(&self.path);
    }
}
