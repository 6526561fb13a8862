pub mod error;
pub mod metadata;
pub mod scanner;
pub mod search;
pub mod workbook;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single cell value as read from a sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Empty,
    Text(String),
    /// Integer cells from `.xls`/`.ods`, kept exact beyond 2^53.
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Lower-cased text form used for matching. Empty cells become `""`.
    pub fn normalized(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for CellValue {
    /// Canonical text form of the cell. Whole numbers print without a fraction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

pub type Row = Vec<CellValue>;

/// A named sheet with its rows in sheet order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// All sheets of one successfully loaded spreadsheet file, in workbook order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

/// One matching row, detached from the store it was found in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub file: PathBuf,
    pub sheet: String,
    pub cells: Vec<CellValue>,
}

impl MatchRecord {
    /// The file name shown in the result table (the full path for odd paths).
    pub fn file_label(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// How a normalized keyword is compared to a normalized cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The keyword occurs anywhere inside the cell text.
    #[default]
    Substring,
    /// The keyword equals the whole cell text.
    ExactCell,
}

/// A file that could not be loaded. It never enters the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub reason: String,
}

pub use error::CoreError;
pub use metadata::{FileMetadata, MetadataProbe};
pub use scanner::DirectoryScanner;
pub use search::{SearchEngine, SearchOptions};
pub use workbook::{LoadOutcome, WorkbookStore};
