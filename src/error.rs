//! Error types for batch-print

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for batch-print
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The `-f` file list does not exist
    #[error("File list not found: {}", .0.display())]
    FileListNotFound(PathBuf),

    /// Neither the file list nor the arguments named any file
    #[error("No input files specified")]
    NoInputFiles,

    /// Every candidate file was missing
    #[error("No valid files to print")]
    NoValidFiles,

    /// Printer unknown to the print system
    #[error("Printer not found: {printer}\nAvailable printers:{}", format_printers(.available))]
    PrinterNotFound {
        printer: String,
        available: Vec<String>,
    },

    /// No merge tool installed
    #[error("No PDF merge tool available. Install Ghostscript (e.g. `apt install ghostscript` or `brew install ghostscript`)")]
    NoMergeBackend,

    /// An external program could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program exited unsuccessfully
    #[error("{program} failed ({}){}", describe_status(.code), format_stderr(.stderr))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The spooler refused the print job
    #[error("Print submission failed ({}){}", describe_status(.code), format_stderr(.stderr))]
    SubmitFailed {
        code: Option<i32>,
        stderr: String,
    },

    /// Signal handler setup failed
    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// A failed submission exits with the status `lp` itself returned;
    /// every other failure, including a failed merge tool, exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::SubmitFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn format_printers(available: &[String]) -> String {
    if available.is_empty() {
        return " (none)".to_string();
    }
    available.iter().map(|name| format!("\n  {}", name)).collect()
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
