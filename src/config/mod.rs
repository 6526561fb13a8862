pub mod settings;

use crate::core::search::{SearchOptions, DEFAULT_DISPLAY_WIDTH};
use crate::core::MatchMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Excel's column limit (`XFD`). Wider display settings are rejected.
pub const MAX_DISPLAY_COLUMNS: usize = 16_384;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// File name suffix of the spreadsheets to load, matched case-insensitively.
    pub extension: String,
    /// Number of spreadsheet columns (A, B, ...) shown for each matching row.
    pub max_display_columns: usize,
    pub match_mode: MatchMode,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// Replaces out-of-range values read from a config file with defaults.
    pub fn validated(mut self) -> Self {
        if !(1..=MAX_DISPLAY_COLUMNS).contains(&self.max_display_columns) {
            tracing::warn!(
                "max_display_columns {} is outside 1..={}, using {}",
                self.max_display_columns,
                MAX_DISPLAY_COLUMNS,
                DEFAULT_DISPLAY_WIDTH
            );
            self.max_display_columns = DEFAULT_DISPLAY_WIDTH;
        }
        self
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            match_mode: self.match_mode,
            display_width: self.max_display_columns,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extension: ".xlsx".to_string(),
            max_display_columns: DEFAULT_DISPLAY_WIDTH,
            match_mode: MatchMode::Substring,
        }
    }
}
