//! Run configuration

use std::path::PathBuf;

/// Everything one run needs, built once from the command line.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Target printer (CUPS destination name)
    pub printer: String,
    /// Media size passed to `lp -o media=...` (e.g. Letter, A4)
    pub paper_size: String,
    /// Optional newline-delimited list of additional files
    pub file_list: Option<PathBuf>,
    /// Files named on the command line, in order
    pub files: Vec<PathBuf>,
    /// Job title passed to `lp -t`
    pub title: Option<String>,
    /// Merge and report, but do not submit
    pub dry_run: bool,
}

impl Config {
    pub fn new(printer: impl Into<String>, paper_size: impl Into<String>) -> Self {
        Self {
            printer: printer.into(),
            paper_size: paper_size.into(),
            ..Self::default()
        }
    }
}

/// Programs used to talk to the print system and merge documents.
#[derive(Debug, Clone)]
pub struct Tools {
    pub lp: String,
    pub lpstat: String,
    pub gs: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            lp: "lp".to_string(),
            lpstat: "lpstat".to_string(),
            gs: "gs".to_string(),
        }
    }
}
