//! Temp file removal on interruption
//!
//! Drop handles normal and error exits. A signal kills the process without
//! running destructors, so live temp files are also tracked here and removed
//! by the signal handler.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};
use crate::error::Result;

/// Exit status used after an interrupting signal (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Shared set of temp paths to delete if the process is interrupted.
#[derive(Debug, Clone, Default)]
pub struct CleanupRegistry {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, path: &Path) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_path_buf());
        }
    }

    pub fn unregister(&self, path: &Path) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.retain(|p| p != path);
        }
    }

    /// Paths currently registered.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Delete every registered path, ignoring files that are already gone.
    pub fn remove_all(&self) {
        if let Ok(mut paths) = self.paths.lock() {
            for path in paths.drain(..) {
                let _ = fs::remove_file(&path);
            }
        }
    }

    /// Install a SIGINT/SIGTERM/SIGHUP handler that removes registered files and exits.
    pub fn install_signal_handler(&self) -> Result<()> {
        let registry = self.clone();
        ctrlc::set_handler(move || {
            registry.remove_all();
            eprintln!("Interrupted");
            process::exit(INTERRUPTED_EXIT_CODE);
        })?;
        Ok(())
    }
}
