//! Batch Print Library
//!
//! Prints a batch of documents as one spooled job. This library provides
//! functionality to:
//! - Read file lists and drop files that do not exist
//! - Merge PDFs with an external tool (macOS Combine PDF Pages or Ghostscript)
//! - Check printers and submit jobs through CUPS
//! - Remove the temporary merged document on every exit path
//!
//! # Example
//!
//! ```no_run
//! use batch_print::{job, CleanupRegistry, Config};
//! use batch_print::pdf::default_backends;
//! use batch_print::printer::Cups;
//! use std::path::PathBuf;
//!
//! let mut config = Config::new("Office", "A4");
//! config.files = vec![PathBuf::from("intro.pdf"), PathBuf::from("exercises.pdf")];
//!
//! let registry = CleanupRegistry::new();
//! job::run(
//!     &config,
//!     &Cups::default(),
//!     &default_backends("gs"),
//!     &registry,
//!     &mut std::io::stdout(),
//!     &mut std::io::stderr(),
//! )
//! .expect("Failed to print");
//! ```

pub mod cleanup;
pub mod command;
pub mod config;
pub mod error;
pub mod inputs;
pub mod job;
pub mod pdf;
pub mod printer;

// Re-export commonly used items
pub use cleanup::CleanupRegistry;
pub use config::{Config, Tools};
pub use error::{Error, Result};
pub use job::JobReport;
