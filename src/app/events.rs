//! Defines the event and command structures exchanged with the presenter.

use super::view_model::ResultTable;
use crate::core::FileMetadata;
use std::path::PathBuf;

/// Events sent from the command handlers to the presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// The result table changed and must be re-rendered in full.
    ResultsUpdated(Box<ResultTable>),
    /// A one-line status summary, e.g. after a load cycle.
    StatusUpdate(String),
    /// An informational message, not a fault.
    ShowInfo(String),
    /// An error message to be displayed to the user.
    ShowError(String),
    /// File details for the file info popup.
    ShowMetadata(Box<FileMetadata>),
    /// The text that was placed on the clipboard.
    CopiedToClipboard(String),
}

/// A user request parsed from one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search every loaded sheet for the keyword.
    Search(String),
    /// Select a result row (one-based).
    Select(usize),
    /// Copy a result row, or the selected one, as tab-separated text.
    Copy(Option<usize>),
    /// Show file details for a result row, or the selected one.
    Info(Option<usize>),
    /// Run a fresh load cycle over the working directory.
    Reload,
    /// Write the active configuration to a JSON file.
    ExportConfig(PathBuf),
    /// Read a configuration file, apply it and reload.
    ImportConfig(PathBuf),
    Help,
    Quit,
    /// A `:`-prefixed line that did not parse.
    Unknown(String),
}
