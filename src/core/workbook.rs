//! Loads spreadsheet files into an in-memory, read-only store.

use super::{CellValue, CoreError, LoadFailure, Row, Sheet, Workbook};
use calamine::{open_workbook, Data, Ods, Range, Reader, Sheets, Xls, Xlsb, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Loaded workbooks keyed by path, kept in load order.
#[derive(Debug, Clone, Default)]
pub struct WorkbookStore {
    entries: Vec<(PathBuf, Workbook)>,
}

/// The result of one full load cycle.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub store: WorkbookStore,
    pub failures: Vec<LoadFailure>,
}

impl WorkbookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a workbook. A path that is already present keeps its position and
    /// has its workbook replaced.
    pub fn insert(&mut self, path: PathBuf, workbook: Workbook) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = workbook,
            None => self.entries.push((path, workbook)),
        }
    }

    pub fn get(&self, path: &Path) -> Option<&Workbook> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, workbook)| workbook)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Workbook)> {
        self.entries.iter().map(|(p, w)| (p.as_path(), w))
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads every path into a fresh store.
    ///
    /// A file that cannot be read is left out of the store and reported through
    /// `on_failure` right away, once per file. One bad file never stops the batch.
    pub fn load_all<F>(paths: &[PathBuf], mut on_failure: F) -> LoadOutcome
    where
        F: FnMut(&LoadFailure),
    {
        let mut outcome = LoadOutcome::default();

        for path in paths {
            match Self::load_workbook(path) {
                Ok(workbook) => {
                    tracing::debug!(
                        "Loaded {:?}: {} sheets, {} rows",
                        path,
                        workbook.sheets.len(),
                        workbook.row_count()
                    );
                    outcome.store.insert(path.clone(), workbook);
                }
                Err(e) => {
                    tracing::warn!("Error loading {:?}: {}", path, e);
                    let failure = LoadFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    };
                    on_failure(&failure);
                    outcome.failures.push(failure);
                }
            }
        }

        tracing::info!(
            "✅ Loaded {} workbooks, {} failed",
            outcome.store.len(),
            outcome.failures.len()
        );
        outcome
    }

    /// Parses a single file into a `Workbook`. Every sheet must be readable.
    pub fn load_workbook(path: &Path) -> Result<Workbook, CoreError> {
        let mut sheets = open_sheets(path)?;
        let names = sheets.sheet_names().to_vec();

        let mut workbook = Workbook::default();
        for name in names {
            let range = sheets
                .worksheet_range(&name)
                .map_err(|e| CoreError::SheetRead(path.to_path_buf(), name.clone(), e.to_string()))?;
            workbook.sheets.push(Sheet {
                rows: rows_from_range(&range),
                name,
            });
        }
        Ok(workbook)
    }
}

/// Picks the reader from the lower-cased extension, so `.XLSX` opens like `.xlsx`.
fn open_sheets(path: &Path) -> Result<Sheets<BufReader<File>>, CoreError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let open_error = |message: String| CoreError::WorkbookOpen(path.to_path_buf(), message);

    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") | Some("xlam") => open_workbook::<Xlsx<_>, _>(path)
            .map(Sheets::Xlsx)
            .map_err(|e| open_error(e.to_string())),
        Some("xls") | Some("xla") => open_workbook::<Xls<_>, _>(path)
            .map(Sheets::Xls)
            .map_err(|e| open_error(e.to_string())),
        Some("xlsb") => open_workbook::<Xlsb<_>, _>(path)
            .map(Sheets::Xlsb)
            .map_err(|e| open_error(e.to_string())),
        Some("ods") => open_workbook::<Ods<_>, _>(path)
            .map(Sheets::Ods)
            .map_err(|e| open_error(e.to_string())),
        _ => Err(CoreError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Column A is always cell 0: a used range that starts further right is
/// padded with empty cells.
fn rows_from_range(range: &Range<Data>) -> Vec<Row> {
    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    range
        .rows()
        .map(|cells| {
            let mut row = Vec::with_capacity(leading_cols + cells.len());
            row.extend(std::iter::repeat(CellValue::Empty).take(leading_cols));
            row.extend(cells.iter().map(cell_value));
            row
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
