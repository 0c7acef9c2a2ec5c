// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::core::text::fold;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub extract: ExtractOptions,
    pub export: ExportOptions,
    pub run: RunOptions,
}

/// The one header-indicator value, stored folded to lower case.
///
/// The table selector and the sheet writer both take it from here, so the
/// two "is this a header?" checks cannot drift apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderIndicator(String);

impl HeaderIndicator {
    pub fn new(raw: &str) -> Self {
        Self(fold(raw.trim()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Substring test used on header cell text ("Key/Term", "KeyID" match `key`).
    pub fn found_in(&self, text: &str) -> bool {
        fold(text).contains(&self.0)
    }

    /// Whole-field test used on emitted records.
    pub fn is_field(&self, field: &str) -> bool {
        fold(field) == self.0
    }
}

impl Default for HeaderIndicator {
    fn default() -> Self { Self::new(DEFAULT_HEADER_INDICATOR) }
}

/// How wide a table's grid is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnBasis {
    /// Number of cells in the first row, spans ignored.
    #[default]
    FirstRowCells,
    /// Widest row, counting each cell's colspan.
    WidestRow,
}

impl ColumnBasis {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-row" | "first_row" => Some(Self::FirstRowCells),
            "widest" => Some(Self::WidestRow),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub header_indicator: HeaderIndicator,
    pub table_selector: String,
    pub column_basis: ColumnBasis,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_indicator: HeaderIndicator::default(),
            table_selector: s!(DEFAULT_TABLE_SELECTOR),
            column_basis: ColumnBasis::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetOptions {
    pub format: ExportFormat,
    /// Clear the top-left header cell, like the workbook the tool used to produce.
    pub blank_corner: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self { format: ExportFormat::Tsv, blank_corner: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub record_format: ExportFormat,
    /// `None` stops after the intermediate records.
    pub sheet: Option<SheetOptions>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            record_format: ExportFormat::Csv,
            sheet: Some(SheetOptions::default()),
        }
    }
}

impl ExportOptions {
    /// `guide.html` → `guide.html.csv`
    pub fn records_path(&self, source: &Path) -> PathBuf {
        let mut name = source.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(self.record_format.ext());
        source.with_file_name(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub workers: usize,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            workers: WORKERS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_is_case_insensitive_both_ways() {
        let key = HeaderIndicator::new(" KEY ");
        assert_eq!(key.as_str(), "key");
        assert!(key.found_in("Key/Term"));
        assert!(key.found_in("KeyID"));
        assert!(!key.found_in("Term"));
        assert!(key.is_field("Key"));
        assert!(!key.is_field("Keyboard"));
    }

    #[test]
    fn records_path_appends_extension() {
        let mut export = ExportOptions::default();
        assert_eq!(
            export.records_path(Path::new("docs/guide.html")),
            PathBuf::from("docs/guide.html.csv")
        );
        export.record_format = ExportFormat::Tsv;
        assert_eq!(
            export.records_path(Path::new("guide.html")),
            PathBuf::from("guide.html.tsv")
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!(ColumnBasis::parse("Widest"), Some(ColumnBasis::WidestRow));
        assert_eq!(ColumnBasis::parse("first-row"), Some(ColumnBasis::FirstRowCells));
        assert_eq!(ColumnBasis::parse("all"), None);
        assert_eq!(ExportFormat::parse("TSV"), Some(ExportFormat::Tsv));
    }
}
