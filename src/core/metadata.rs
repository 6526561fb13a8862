//! Reads file-system and document metadata for the file info popup.

use super::CoreError;
use chrono::{DateTime, Local};
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use zip::ZipArchive;

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub author: String,
}

impl FileMetadata {
    /// Human-readable lines for a popup. Missing values read "Unknown".
    pub fn display_lines(&self) -> Vec<String> {
        let timestamp = |t: &Option<DateTime<Local>>| {
            t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };
        vec![
            format!("File: {}", self.path.display()),
            format!("Size: {} bytes", self.size),
            format!("Created: {}", timestamp(&self.created)),
            format!("Modified: {}", timestamp(&self.modified)),
            format!("Author: {}", self.author),
        ]
    }
}

pub struct MetadataProbe;

impl MetadataProbe {
    /// Collects size, timestamps and author for `path`.
    ///
    /// Only a failure to stat the file is an error. Timestamps the platform
    /// cannot provide are `None`, and the author falls back to "Unknown".
    pub fn probe(path: &Path) -> Result<FileMetadata, CoreError> {
        let metadata = fs::metadata(path).map_err(|e| CoreError::Io(e, path.to_path_buf()))?;
        let to_local = |t: std::io::Result<SystemTime>| t.ok().map(DateTime::<Local>::from);

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            created: to_local(metadata.created()),
            modified: to_local(metadata.modified()),
            author: Self::read_author(path).unwrap_or_else(|| UNKNOWN.to_string()),
        })
    }

    /// Reads `dc:creator` from `docProps/core.xml` inside an OOXML package.
    fn read_author(path: &Path) -> Option<String> {
        let file = File::open(path).ok()?;
        let mut archive = ZipArchive::new(file).ok()?;

        let xml_content = {
            let mut core_xml = archive.by_name("docProps/core.xml").ok()?;
            let mut content = String::new();
            core_xml.read_to_string(&mut content).ok()?;
            content
        };

        Self::parse_creator(&xml_content)
    }

    fn parse_creator(xml: &str) -> Option<String> {
        let mut reader = XmlReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut in_creator = false;
        let mut author = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"dc:creator" => in_creator = true,
                Ok(Event::End(e)) if e.name().as_ref() == b"dc:creator" => in_creator = false,
                Ok(Event::Text(e)) if in_creator => {
                    if let Ok(text) = e.unescape() {
                        let text = text.trim();
                        if !text.is_empty() {
                            author = Some(text.to_string());
                        }
                    }
                }
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        author
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellValue;
    use crate::utils::test_helpers::write_workbook;
    use tempfile::tempdir;

    #[test]
    fn test_probe_reads_author_and_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("owned.xlsx");
        write_workbook(
            &path,
            &[("S", vec![vec![CellValue::from("x")]])],
            Some("Ada Lovelace"),
        )
        .unwrap();

        let metadata = MetadataProbe::probe(&path).unwrap();

        assert_eq!(metadata.path, path);
        assert_eq!(metadata.size, fs::metadata(&path).unwrap().len());
        assert_eq!(metadata.author, "Ada Lovelace");
        assert!(metadata.modified.is_some());
    }

    #[test]
    fn test_probe_without_core_properties_is_unknown_author() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anonymous.xlsx");
        write_workbook(&path, &[("S", vec![vec![CellValue::from("x")]])], None).unwrap();

        assert_eq!(MetadataProbe::probe(&path).unwrap().author, UNKNOWN);
    }

    #[test]
    fn test_probe_of_non_workbook_is_unknown_author() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.xlsx");
        fs::write(&path, b"plain text").unwrap();

        let metadata = MetadataProbe::probe(&path).unwrap();
        assert_eq!(metadata.author, UNKNOWN);
        assert_eq!(metadata.size, 10);
    }

    #[test]
    fn test_probe_of_missing_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.xlsx");
        assert!(matches!(
            MetadataProbe::probe(&missing),
            Err(CoreError::Io(_, p)) if p == missing
        ));
    }

    #[test]
    fn test_parse_creator_handles_escapes_and_blanks() {
        let xml = r#"<cp:coreProperties xmlns:cp="x" xmlns:dc="y"><dc:creator>Tom &amp; Jerry</dc:creator></cp:coreProperties>"#;
        assert_eq!(
            MetadataProbe::parse_creator(xml),
            Some("Tom & Jerry".to_string())
        );

        let blank = r#"<cp:coreProperties xmlns:cp="x" xmlns:dc="y"><dc:creator>  </dc:creator></cp:coreProperties>"#;
        assert_eq!(MetadataProbe::parse_creator(blank), None);
    }

    #[test]
    fn test_display_lines_fall_back_to_unknown() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.xlsx"),
            size: 12,
            created: None,
            modified: None,
            author: UNKNOWN.to_string(),
        };
        let lines = metadata.display_lines();
        assert_eq!(lines[1], "Size: 12 bytes");
        assert_eq!(lines[2], "Created: Unknown");
        assert_eq!(lines[3], "Modified: Unknown");
        assert_eq!(lines[4], "Author: Unknown");
    }
}
