//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// This enum encapsulates all possible errors that can occur during
/// core operations like directory discovery, workbook loading, searching
/// and metadata probing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// The spreadsheet library could not open or parse the workbook.
    #[error("Failed to open workbook {0}: {1}")]
    WorkbookOpen(PathBuf, String),

    /// A single sheet of an otherwise readable workbook could not be read.
    #[error("Failed to read sheet '{1}' in {0}: {2}")]
    SheetRead(PathBuf, String, String),

    /// The file extension does not map to any known spreadsheet format.
    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The search keyword was empty after trimming whitespace.
    #[error("Please enter a keyword to search.")]
    EmptyKeyword,

    /// The search was asked to run with options it cannot honor.
    #[error("Invalid search options: {0}")]
    InvalidSearchOptions(String),
}

impl CoreError {
    /// `true` for the informational empty-keyword signal, which is not a fault.
    pub fn is_empty_keyword(&self) -> bool {
        matches!(self, CoreError::EmptyKeyword)
    }
}
