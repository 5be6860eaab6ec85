//! PDF merging through external tools
//!
//! Backends are probed in priority order and the first available one wins:
//! the macOS "Combine PDF Pages" join script, then Ghostscript.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use crate::cleanup::CleanupRegistry;
use crate::command;
use crate::error::{Error, Result};
use super::merged::MergedDocument;

/// Location of the join script shipped with macOS Automator.
pub const COMBINE_PDF_PAGES_PATH: &str =
    "/System/Library/Automator/Combine PDF Pages.action/Contents/Resources/join.py";

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths in the order they should be merged
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// A tool that can combine several documents into one PDF.
pub trait MergeBackend {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Whether the tool is installed and runnable
    fn is_available(&self) -> bool;

    /// Combine `options.input_paths`, in order, into `options.output_path`
    fn merge(&self, options: &MergeOptions) -> Result<()>;
}

/// The macOS Automator join script.
#[derive(Debug, Clone)]
pub struct CombinePdfPages {
    path: PathBuf,
}

impl CombinePdfPages {
    pub fn new() -> Self {
        Self::at(COMBINE_PDF_PAGES_PATH)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for CombinePdfPages {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeBackend for CombinePdfPages {
    fn name(&self) -> &str {
        "Combine PDF Pages"
    }

    fn is_available(&self) -> bool {
        is_executable(&self.path)
    }

    fn merge(&self, options: &MergeOptions) -> Result<()> {
        command::run(&mut self.command(options))?;
        Ok(())
    }
}

impl CombinePdfPages {
    fn command(&self, options: &MergeOptions) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.arg("-o")
            .arg(&options.output_path)
            .args(options.input_paths.iter().map(|p| as_operand(p)));
        cmd
    }
}

/// Ghostscript's pdfwrite device, found on the search path.
#[derive(Debug, Clone)]
pub struct Ghostscript {
    program: String,
}

impl Ghostscript {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for Ghostscript {
    fn default() -> Self {
        Self::new("gs")
    }
}

impl MergeBackend for Ghostscript {
    fn name(&self) -> &str {
        "Ghostscript"
    }

    fn is_available(&self) -> bool {
        command::probe(&self.program, &["--version"])
    }

    fn merge(&self, options: &MergeOptions) -> Result<()> {
        command::run(&mut self.command(options))?;
        Ok(())
    }
}

impl Ghostscript {
    fn command(&self, options: &MergeOptions) -> Command {
        let mut output_arg = OsString::from("-sOutputFile=");
        output_arg.push(&options.output_path);

        let mut cmd = Command::new(&self.program);
        cmd.args(["-q", "-dBATCH", "-dNOPAUSE", "-dSAFER", "-sDEVICE=pdfwrite"])
            .arg(output_arg)
            .args(options.input_paths.iter().map(|p| as_operand(p)));
        cmd
    }
}

/// The standard backends in priority order.
pub fn default_backends(gs_program: &str) -> Vec<Box<dyn MergeBackend>> {
    vec![
        Box::new(CombinePdfPages::new()),
        Box::new(Ghostscript::new(gs_program)),
    ]
}

/// First available backend, if any.
pub fn select_backend(backends: &[Box<dyn MergeBackend>]) -> Option<&dyn MergeBackend> {
    backends
        .iter()
        .map(|backend| backend.as_ref())
        .find(|backend| {
            let available = backend.is_available();
            log::debug!("merge backend {}: available={}", backend.name(), available);
            available
        })
}

/// Merge `inputs`, in order, into a new temporary document.
///
/// The temp file exists (and is registered for cleanup) before the backend
/// runs, so a failed or interrupted merge leaves nothing behind.
pub fn merge_pdfs(
    backends: &[Box<dyn MergeBackend>],
    inputs: &[PathBuf],
    registry: &CleanupRegistry,
) -> Result<MergedDocument> {
    if inputs.is_empty() {
        return Err(Error::NoValidFiles);
    }

    let backend = select_backend(backends).ok_or(Error::NoMergeBackend)?;

    let merged = MergedDocument::create(registry)?;
    let options = MergeOptions {
        input_paths: inputs.to_vec(),
        output_path: merged.path().to_path_buf(),
    };

    log::info!("merging {} files with {}", inputs.len(), backend.name());
    backend.merge(&options)?;

    Ok(merged)
}

/// Relative paths starting with `-` get a `./` prefix so tools read them as files, not options.
fn as_operand(path: &Path) -> PathBuf {
    if path.is_relative() && path.to_string_lossy().starts_with('-') {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
