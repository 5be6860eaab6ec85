//! Print system access

pub mod cups;

use std::path::PathBuf;
use crate::error::Result;

pub use cups::{parse_printer_names, parse_request_id, Cups};

/// A single print request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    /// Destination printer name
    pub printer: String,
    /// Media size, e.g. "Letter" or "A4"
    pub media: String,
    /// Optional job title
    pub title: Option<String>,
    /// Document to print
    pub document: PathBuf,
}

/// The spooler operations the orchestrator needs.
pub trait PrintSystem {
    /// Whether a printer with exactly this name is configured
    fn has_printer(&self, name: &str) -> Result<bool>;

    /// Names of all configured printers
    fn printers(&self) -> Result<Vec<String>>;

    /// Submit one job, returning the spooler's request id when it reports one
    fn submit(&self, request: &PrintRequest) -> Result<Option<String>>;

    /// Human-readable form of the submission, for dry runs
    fn describe(&self, request: &PrintRequest) -> String;
}
