//! Defines the central, mutable state of the application.

use crate::config::AppConfig;
use crate::core::{LoadFailure, MatchRecord, WorkbookStore};
use std::path::PathBuf;

/// Holds the complete, mutable state of the application.
///
/// The state is owned by the input loop and handed to every command as
/// `&mut AppState`; there is a single thread of control, so no locking.
#[derive(Debug)]
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// The directory whose spreadsheets are loaded.
    pub working_dir: PathBuf,
    /// Every workbook that loaded successfully during the last load cycle.
    pub store: WorkbookStore,
    /// Files from the last load cycle that could not be read.
    pub load_failures: Vec<LoadFailure>,
    /// The keyword of the last successful search.
    pub last_query: String,
    /// The rows shown in the result table.
    pub results: Vec<MatchRecord>,
    /// Zero-based index into `results` of the selected row.
    pub selected_row: Option<usize>,
    /// A one-line summary of what happened last.
    pub status_message: String,
}

impl AppState {
    pub fn new(config: AppConfig, working_dir: PathBuf) -> Self {
        Self {
            config,
            working_dir,
            store: WorkbookStore::new(),
            load_failures: Vec::new(),
            last_query: String::new(),
            results: Vec::new(),
            selected_row: None,
            status_message: "Ready.".to_string(),
        }
    }

    /// Drops the current results and selection.
    pub fn clear_results(&mut self) {
        self.last_query.clear();
        self.results.clear();
        self.selected_row = None;
    }

    /// Resolves a one-based row number, or the selection when `row` is `None`.
    pub fn result_at(&self, row: Option<usize>) -> Result<&MatchRecord, String> {
        match row {
            Some(number) => number
                .checked_sub(1)
                .and_then(|index| self.results.get(index))
                .ok_or_else(|| {
                    format!(
                        "There is no result row {} ({} rows shown).",
                        number,
                        self.results.len()
                    )
                }),
            None => self
                .selected_row
                .and_then(|index| self.results.get(index))
                .ok_or_else(|| "Select a row first.".to_string()),
        }
    }
}
