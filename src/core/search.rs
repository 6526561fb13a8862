//! Provides the keyword search over all loaded workbooks.

use super::{CoreError, MatchMode, MatchRecord, Row, WorkbookStore};
use std::path::Path;

pub const DEFAULT_DISPLAY_WIDTH: usize = 10;

/// Tunables for a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub match_mode: MatchMode,
    /// Number of leading cells copied into each `MatchRecord`.
    pub display_width: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

/// A brute-force, case-insensitive row search.
///
/// This struct is stateless and provides methods as associated functions.
/// Every call re-scans the whole store; nothing is indexed or cached.
pub struct SearchEngine;

impl SearchEngine {
    /// Returns every matching row across the store, in traversal order:
    /// workbooks in store order, then sheets, then rows.
    ///
    /// A keyword that is blank after trimming is rejected with
    /// `CoreError::EmptyKeyword` before anything is scanned.
    pub fn search(
        keyword: &str,
        store: &WorkbookStore,
        options: &SearchOptions,
    ) -> Result<Vec<MatchRecord>, CoreError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(CoreError::EmptyKeyword);
        }
        if options.display_width == 0 {
            return Err(CoreError::InvalidSearchOptions(
                "display width must be at least one column".to_string(),
            ));
        }

        let keyword_lower = keyword.to_lowercase();
        let mut results = Vec::new();

        for (path, workbook) in store.iter() {
            for sheet in &workbook.sheets {
                for row in &sheet.rows {
                    if Self::row_matches(row, &keyword_lower, options.match_mode) {
                        results.push(Self::snapshot(path, &sheet.name, row, options.display_width));
                    }
                }
            }
        }

        tracing::info!(
            "🔍 Search for '{}' matched {} rows in {} workbooks",
            keyword,
            results.len(),
            store.len()
        );
        Ok(results)
    }

    /// Checks a row against an already lower-cased keyword.
    pub fn row_matches(row: &Row, keyword_lower: &str, mode: MatchMode) -> bool {
        row.iter().any(|cell| {
            let cell_lower = cell.normalized();
            match mode {
                MatchMode::Substring => cell_lower.contains(keyword_lower),
                MatchMode::ExactCell => cell_lower == keyword_lower,
            }
        })
    }

    fn snapshot(path: &Path, sheet: &str, row: &Row, width: usize) -> MatchRecord {
        MatchRecord {
            file: path.to_path_buf(),
            sheet: sheet.to_string(),
            cells: row.iter().take(width).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellValue, Sheet, Workbook};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn text_row(cells: &[&str]) -> Row {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn store_with(files: Vec<(&str, Vec<(&str, Vec<Row>)>)>) -> WorkbookStore {
        let mut store = WorkbookStore::new();
        for (file, sheets) in files {
            let workbook = Workbook {
                sheets: sheets
                    .into_iter()
                    .map(|(name, rows)| Sheet {
                        name: name.to_string(),
                        rows,
                    })
                    .collect(),
            };
            store.insert(PathBuf::from(file), workbook);
        }
        store
    }

    fn create_test_store() -> WorkbookStore {
        store_with(vec![(
            "data.xlsx",
            vec![(
                "Sheet1",
                vec![text_row(&["Foo", "Bar"]), text_row(&["Baz", "fOOter"])],
            )],
        )])
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let store = create_test_store();
        let results = SearchEngine::search("foo", &store, &SearchOptions::default()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].cells, text_row(&["Foo", "Bar"]));
        assert_eq!(results[1].cells, text_row(&["Baz", "fOOter"]));
        assert!(results.iter().all(|r| r.sheet == "Sheet1"));
        assert!(results.iter().all(|r| r.file == PathBuf::from("data.xlsx")));
    }

    #[test]
    fn test_upper_case_keyword_matches() {
        let store = create_test_store();
        let results = SearchEngine::search("BAZ", &store, &SearchOptions::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cells[0], CellValue::from("Baz"));
    }

    #[test]
    fn test_keyword_is_trimmed_before_matching() {
        let store = create_test_store();
        let results = SearchEngine::search("  bar  ", &store, &SearchOptions::default()).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_no_match_returns_empty_list() {
        let store = create_test_store();
        let results = SearchEngine::search("quux", &store, &SearchOptions::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_keyword_is_rejected() {
        let store = create_test_store();
        for keyword in ["", "   ", "\t\n"] {
            let result = SearchEngine::search(keyword, &store, &SearchOptions::default());
            assert!(matches!(result, Err(CoreError::EmptyKeyword)));
        }
    }

    #[test]
    fn test_zero_display_width_is_invalid() {
        let store = create_test_store();
        let options = SearchOptions {
            display_width: 0,
            ..Default::default()
        };
        let result = SearchEngine::search("foo", &store, &options);
        assert!(matches!(result, Err(CoreError::InvalidSearchOptions(_))));
    }

    #[test]
    fn test_exact_cell_mode_requires_whole_cell() {
        let store = create_test_store();
        let options = SearchOptions {
            match_mode: MatchMode::ExactCell,
            ..Default::default()
        };
        let results = SearchEngine::search("foo", &store, &options).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cells, text_row(&["Foo", "Bar"]));
    }

    #[test]
    fn test_row_with_several_matching_cells_is_emitted_once() {
        let store = store_with(vec![(
            "dup.xlsx",
            vec![("S", vec![text_row(&["apple", "pineapple", "apple pie"])])],
        )]);
        let results = SearchEngine::search("apple", &store, &SearchOptions::default()).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_wide_row_is_truncated_to_display_width() {
        let row: Row = (1..=15).map(|i| CellValue::Text(format!("Cell{}", i))).collect();
        let store = store_with(vec![("wide.xlsx", vec![("S", vec![row.clone()])])]);

        let results = SearchEngine::search("cell15", &store, &SearchOptions::default()).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cells.len(), 10);
        assert_eq!(results[0].cells, row[..10].to_vec());
    }

    #[test]
    fn test_short_row_is_not_padded() {
        let store = store_with(vec![("short.xlsx", vec![("S", vec![text_row(&["only"])])])]);
        let results = SearchEngine::search("only", &store, &SearchOptions::default()).unwrap();
        assert_eq!(results[0].cells, text_row(&["only"]));
    }

    #[test]
    fn test_non_text_cells_match_by_canonical_text() {
        let store = store_with(vec![(
            "mixed.xlsx",
            vec![(
                "S",
                vec![
                    vec![CellValue::Number(42.0), CellValue::Empty],
                    vec![CellValue::Bool(true)],
                    vec![CellValue::Number(3.5)],
                ],
            )],
        )]);
        let options = SearchOptions::default();

        assert_eq!(SearchEngine::search("42", &store, &options).unwrap().len(), 1);
        assert_eq!(SearchEngine::search("true", &store, &options).unwrap().len(), 1);
        assert_eq!(SearchEngine::search("3.5", &store, &options).unwrap().len(), 1);
        // A whole number is written without a fraction, so "42.0" is absent.
        assert!(SearchEngine::search("42.0", &store, &options).unwrap().is_empty());
    }

    #[test]
    fn test_results_follow_traversal_order() {
        let store = store_with(vec![
            (
                "first.xlsx",
                vec![
                    ("A", vec![text_row(&["hit 1"]), text_row(&["miss"]), text_row(&["hit 2"])]),
                    ("B", vec![text_row(&["hit 3"])]),
                ],
            ),
            ("second.xlsx", vec![("A", vec![text_row(&["hit 4"])])]),
        ]);

        let results = SearchEngine::search("hit", &store, &SearchOptions::default()).unwrap();
        let labels: Vec<_> = results.iter().map(|r| r.cells[0].to_string()).collect();
        assert_eq!(labels, vec!["hit 1", "hit 2", "hit 3", "hit 4"]);
        assert_eq!(results[2].sheet, "B");
        assert_eq!(results[3].file, PathBuf::from("second.xlsx"));
    }

    #[test]
    fn test_same_sheet_name_in_two_files_is_kept_apart() {
        let store = store_with(vec![
            ("a.xlsx", vec![("Sheet1", vec![text_row(&["shared"])])]),
            ("b.xlsx", vec![("Sheet1", vec![text_row(&["shared"])])]),
        ]);
        let results = SearchEngine::search("shared", &store, &SearchOptions::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_ne!(results[0].file, results[1].file);
    }

    #[test]
    fn test_records_do_not_alias_the_store() {
        let mut store = create_test_store();
        let results = SearchEngine::search("foo", &store, &SearchOptions::default()).unwrap();

        store.insert(PathBuf::from("data.xlsx"), Workbook::default());

        assert_eq!(results[0].cells, text_row(&["Foo", "Bar"]));
        assert!(SearchEngine::search("foo", &store, &SearchOptions::default())
            .unwrap()
            .is_empty());
    }

    fn cell_strategy() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            Just(CellValue::Empty),
            "[a-zA-Z ]{0,8}".prop_map(CellValue::Text),
            (-1000i32..1000).prop_map(|n| CellValue::Number(n as f64)),
            any::<bool>().prop_map(CellValue::Bool),
        ]
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(prop::collection::vec(cell_strategy(), 0..15), 0..20)
    }

    proptest! {
        #[test]
        fn prop_search_is_idempotent(rows in rows_strategy(), keyword in "[a-zA-Z]{1,3}") {
            let store = store_with(vec![("p.xlsx", vec![("S", rows)])]);
            let options = SearchOptions::default();
            let first = SearchEngine::search(&keyword, &store, &options).unwrap();
            let second = SearchEngine::search(&keyword, &store, &options).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_every_result_is_a_truncated_matching_row(
            rows in rows_strategy(),
            keyword in "[a-zA-Z]{1,3}",
            width in 1usize..12,
        ) {
            let store = store_with(vec![("p.xlsx", vec![("S", rows.clone())])]);
            let options = SearchOptions { display_width: width, ..Default::default() };
            let results = SearchEngine::search(&keyword, &store, &options).unwrap();

            let keyword_lower = keyword.to_lowercase();
            let expected: Vec<Vec<CellValue>> = rows
                .iter()
                .filter(|row| SearchEngine::row_matches(row, &keyword_lower, MatchMode::Substring))
                .map(|row| row.iter().take(width).cloned().collect())
                .collect();
            let actual: Vec<Vec<CellValue>> = results.into_iter().map(|r| r.cells).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
