//! PDF merging module

pub mod merge;
pub mod merged;

// Re-export commonly used items
pub use merge::{
    default_backends, merge_pdfs, select_backend, CombinePdfPages, Ghostscript, MergeBackend,
    MergeOptions,
};
pub use merged::MergedDocument;
