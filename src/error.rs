//! Fatal errors of the chapter split pipeline.
//!
//! Anything recoverable (an unresolvable bookmark, a chapter that could not
//! be written) is recorded in the [`SplitSummary`](crate::splitter::SplitSummary)
//! instead of being raised here.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SplitError>;

#[derive(Error, Debug)]
pub enum SplitError {
    /// Input path does not exist or is not a regular file
    #[error("PDF not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Input does not carry a .pdf extension
    #[error("Not a PDF file: {}", path.display())]
    NotPdf { path: PathBuf },

    /// Input could not be parsed
    #[error("Failed to open PDF {}: {source}", path.display())]
    InvalidPdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("PDF is encrypted: {}", path.display())]
    Encrypted { path: PathBuf },

    #[error("PDF has no pages: {}", path.display())]
    EmptyDocument { path: PathBuf },

    /// The outline has no top-level entry that resolves to a page
    #[error("No chapters found: {} has no usable bookmarks", path.display())]
    NoChaptersFound { path: PathBuf },

    #[error("Output directory {} is not writable: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid chapter selection: {0}")]
    InvalidSelection(String),

    #[error("Pages {start}..{end} out of range (total: {total})")]
    PageRangeOutOfBounds { start: u32, end: u32, total: u32 },
}

