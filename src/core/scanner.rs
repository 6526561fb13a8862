//! Finds candidate spreadsheet files in a single directory.

use super::CoreError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct DirectoryScanner {
    extension: String,
}

impl DirectoryScanner {
    /// Creates a scanner for the given extension. A leading dot is optional
    /// and the comparison ignores case, so `"xlsx"` and `".XLSX"` are equivalent.
    pub fn new(extension: &str) -> Self {
        let trimmed = extension.trim();
        let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
        Self {
            extension: format!(".{}", bare.to_lowercase()),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Lists the regular files directly inside `root_path` whose names end with
    /// the configured extension, in directory-listing order. Not recursive.
    pub fn list_candidate_files(&self, root_path: &Path) -> Result<Vec<PathBuf>, CoreError> {
        let entries =
            fs::read_dir(root_path).map_err(|e| CoreError::Io(e, root_path.to_path_buf()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoreError::Io(e, root_path.to_path_buf()))?;
            let path = entry.path();

            // Entries that vanish or cannot be stat'ed are skipped, not fatal.
            let is_file = match entry.file_type() {
                Ok(ft) if ft.is_symlink() => path.is_file(),
                Ok(ft) => ft.is_file(),
                Err(_) => false,
            };
            if !is_file {
                continue;
            }

            if self.matches_extension(&path) {
                files.push(path);
            }
        }

        tracing::info!(
            "📂 Found {} '{}' files in {:?}",
            files.len(),
            self.extension,
            root_path
        );
        Ok(files)
    }

    /// Non-UTF-8 names are compared lossily; the ASCII suffix survives intact.
    fn matches_extension(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase().ends_with(&self.extension))
            .unwrap_or(false)
    }
}
