//! Responsible for transforming the `AppState` into a `ResultTable` view model.
//!
//! This module acts as a presentation layer, preparing the match list for the
//! presenter: headers, one string row per match and the column widths.

use crate::core::MatchRecord;
use serde::Serialize;

use super::state::AppState;

/// A serializable representation of the result table.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ResultTable {
    /// `File`, `Sheet`, then the column letters `A`, `B`, ...
    pub headers: Vec<String>,
    /// One entry per match, always as long as `headers`.
    pub rows: Vec<Vec<String>>,
    /// Width of each column in characters: the widest header or cell.
    pub column_widths: Vec<usize>,
    /// Zero-based index of the highlighted row.
    pub selected_row: Option<usize>,
    pub status_message: String,
}

/// Creates the complete `ResultTable` from the current `AppState`.
pub fn generate_result_table(state: &AppState) -> ResultTable {
    let display_columns = state.config.max_display_columns;
    let headers = table_headers(display_columns);
    let rows: Vec<Vec<String>> = state
        .results
        .iter()
        .map(|record| table_row(record, display_columns))
        .collect();
    let column_widths = compute_column_widths(&headers, &rows);

    ResultTable {
        headers,
        rows,
        column_widths,
        selected_row: state.selected_row,
        status_message: state.status_message.clone(),
    }
}

pub fn table_headers(display_columns: usize) -> Vec<String> {
    let mut headers = vec!["File".to_string(), "Sheet".to_string()];
    headers.extend((1..=display_columns).map(column_letter));
    headers
}

/// The displayed values of a match, padded with blanks to the table width.
fn table_row(record: &MatchRecord, display_columns: usize) -> Vec<String> {
    let width = display_columns.saturating_add(2);
    let mut row = Vec::with_capacity(width.min(record.cells.len() + 2));
    row.push(record.file_label());
    row.push(record.sheet.clone());
    row.extend(record.cells.iter().take(display_columns).map(|c| c.to_string()));
    row.resize(width, String::new());
    row
}

/// Each column is as wide as its widest header or cell text.
pub fn compute_column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// The clipboard form of a match: file, sheet and cells joined by tabs.
pub fn row_as_tsv(record: &MatchRecord) -> String {
    let mut values = vec![record.file_label(), record.sheet.clone()];
    values.extend(record.cells.iter().map(|c| c.to_string()));
    values.join("\t")
}

/// Converts a 1-based column number into its spreadsheet letters (1 -> A, 27 -> AA).
pub fn column_letter(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let remainder = (column - 1) % 26;
        letters.push(char::from(b'A' + remainder as u8));
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::CellValue;
    use std::path::PathBuf;

    fn record(file: &str, sheet: &str, cells: Vec<CellValue>) -> MatchRecord {
        MatchRecord {
            file: PathBuf::from(file),
            sheet: sheet.to_string(),
            cells,
        }
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(10), "J");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(53), "BA");
        assert_eq!(column_letter(703), "AAA");
        assert_eq!(column_letter(0), "");
    }

    #[test]
    fn test_headers_use_column_letters() {
        assert_eq!(table_headers(3), vec!["File", "Sheet", "A", "B", "C"]);
        assert_eq!(table_headers(10).last().map(String::as_str), Some("J"));
    }

    #[test]
    fn test_table_rows_are_padded_and_use_file_name() {
        let config = AppConfig {
            max_display_columns: 3,
            ..Default::default()
        };
        let mut state = AppState::new(config, PathBuf::from("/work"));
        state.results = vec![record(
            "/work/books/q1.xlsx",
            "Sales",
            vec![CellValue::from("North"), CellValue::Number(12.0)],
        )];
        state.selected_row = Some(0);

        let table = generate_result_table(&state);

        assert_eq!(table.rows, vec![vec!["q1.xlsx", "Sales", "North", "12", ""]]);
        assert_eq!(table.selected_row, Some(0));
    }

    #[test]
    fn test_column_widths_cover_header_and_widest_cell() {
        let headers = table_headers(2);
        let rows = vec![
            vec!["a.xlsx".to_string(), "S".to_string(), "wide value".to_string(), String::new()],
            vec!["b.xlsx".to_string(), "Longer".to_string(), "x".to_string(), "ü".to_string()],
        ];

        let widths = compute_column_widths(&headers, &rows);

        assert_eq!(widths, vec![6, 6, 10, 1]);
    }

    #[test]
    fn test_empty_results_still_have_header_widths() {
        let state = AppState::new(AppConfig::default(), PathBuf::from("."));
        let table = generate_result_table(&state);
        assert!(table.rows.is_empty());
        assert_eq!(table.column_widths[0], 4);
        assert_eq!(table.column_widths[1], 5);
        assert_eq!(table.column_widths.len(), 12);
    }

    #[test]
    fn test_row_as_tsv_keeps_empty_cells() {
        let r = record(
            "dir/a.xlsx",
            "S",
            vec![CellValue::from("x"), CellValue::Empty, CellValue::Bool(false)],
        );
        assert_eq!(row_as_tsv(&r), "a.xlsx\tS\tx\t\tFALSE");
    }
}
