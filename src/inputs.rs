//! Building the list of files to print
//!
//! Candidates come from an optional file list followed by the command-line
//! arguments. Missing files are dropped with a warning.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};

/// Parse file-list text into paths.
///
/// Empty lines and lines starting with `#` are skipped. Everything else is
/// taken literally, so `  # note` is a path, not a comment.
pub fn parse_file_list(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

/// Prepend the entries of `file_list` (if any) to `files`.
pub fn expand_file_list(file_list: Option<&Path>, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let Some(list_path) = file_list else {
        return Ok(files.to_vec());
    };

    if !list_path.is_file() {
        return Err(Error::FileListNotFound(list_path.to_path_buf()));
    }

    let mut candidates = parse_file_list(&fs::read_to_string(list_path)?);
    log::debug!(
        "read {} entries from file list {}",
        candidates.len(),
        list_path.display()
    );
    candidates.extend_from_slice(files);
    Ok(candidates)
}

/// Keep the candidates that exist as regular files, preserving order.
///
/// Each missing file gets a warning line on `warnings`, regardless of the
/// log level. Fails if nothing is left.
pub fn filter_existing<W: Write>(candidates: &[PathBuf], warnings: &mut W) -> Result<Vec<PathBuf>> {
    let mut valid = Vec::with_capacity(candidates.len());
    for path in candidates {
        if path.is_file() {
            valid.push(path.clone());
        } else {
            writeln!(warnings, "Warning: file not found, skipping: {}", path.display())?;
        }
    }

    if valid.is_empty() {
        return Err(Error::NoValidFiles);
    }

    Ok(valid)
}
