//! The batch print pipeline
//!
//! Each stage runs in order and the first failure ends the run:
//! expand the file list, check the printer, drop missing files, merge, submit.
//! The merged temp document is removed when [`run`] returns, whatever the outcome.

use std::io::Write;
use std::path::PathBuf;
use crate::cleanup::CleanupRegistry;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::inputs::{expand_file_list, filter_existing};
use crate::pdf::{merge_pdfs, MergeBackend};
use crate::printer::{PrintRequest, PrintSystem};

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    /// Files that went into the merged document, in page order
    pub files: Vec<PathBuf>,
    /// Spooler request id, when the job was submitted and one was reported
    pub request_id: Option<String>,
    /// Whether the job was actually submitted
    pub submitted: bool,
}

/// Run one batch print.
///
/// Progress lines go to `out`, per-file warnings to `err`.
pub fn run<W: Write, E: Write>(
    config: &Config,
    print_system: &dyn PrintSystem,
    backends: &[Box<dyn MergeBackend>],
    registry: &CleanupRegistry,
    out: &mut W,
    err: &mut E,
) -> Result<JobReport> {
    let candidates = expand_file_list(config.file_list.as_deref(), &config.files)?;
    if candidates.is_empty() {
        return Err(Error::NoInputFiles);
    }

    check_printer(print_system, &config.printer)?;

    let files = filter_existing(&candidates, err)?;

    let merged = merge_pdfs(backends, &files, registry)?;

    let request = PrintRequest {
        printer: config.printer.clone(),
        media: config.paper_size.clone(),
        title: config.title.clone(),
        document: merged.path().to_path_buf(),
    };

    writeln!(
        out,
        "Printing {} file(s) to {} on {} paper",
        files.len(),
        config.printer,
        config.paper_size
    )?;

    if config.dry_run {
        writeln!(out, "Dry run, not submitting: {}", print_system.describe(&request))?;
        return Ok(JobReport {
            files,
            request_id: None,
            submitted: false,
        });
    }

    let request_id = print_system.submit(&request)?;
    match &request_id {
        Some(id) => writeln!(out, "Submitted request {}", id)?,
        None => writeln!(out, "Submitted")?,
    }

    Ok(JobReport {
        files,
        request_id,
        submitted: true,
    })
}

fn check_printer(print_system: &dyn PrintSystem, printer: &str) -> Result<()> {
    if print_system.has_printer(printer)? {
        return Ok(());
    }

    Err(Error::PrinterNotFound {
        printer: printer.to_string(),
        available: print_system.printers()?,
    })
}
