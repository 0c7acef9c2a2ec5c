// src/sheet.rs
//! Final spreadsheet stage.
//!
//! The sheet writer sits behind [`SheetWriter`]: it receives the ordered
//! records of one document and persists a tabular file next to it. The
//! crate's own implementation, [`DelimitedSheet`], writes CSV or TSV; other
//! backends only have to honour the same shaping rules, which live in
//! [`shape_sheet_rows`] so every backend shares them.

use std::path::{Path, PathBuf};

use crate::config::consts::LOCALE_CODES;
use crate::config::options::{HeaderIndicator, SheetOptions};
use crate::error::{Error, Result};
use crate::file::{with_replaced_extension, write_atomic};
use crate::records::writer as record_writer;

/// Accepts ordered records, produces a persisted tabular file.
pub trait SheetWriter: Send + Sync {
    /// Persist `records` for the document at `source`; returns the written path.
    fn write_sheet(&self, source: &Path, records: &[Vec<String>]) -> Result<PathBuf>;
}

/// `EN`, `Ja`, `kO` … → `en`, `ja`, `ko`; anything else unchanged.
pub fn canonical_locale(field: &str) -> String {
    match LOCALE_CODES.iter().find(|code| field.eq_ignore_ascii_case(code)) {
        Some(code) => s!(*code),
        None => s!(field),
    }
}

/// Apply the sheet rules to a record stream:
/// - the first record is kept as the header row;
/// - any later record with a field equal (case-insensitively) to the
///   header indicator is dropped, since it is the header of another table
///   in the same document;
/// - locale-code fields are canonicalized;
/// - with `blank_corner`, the header row's first cell is cleared.
pub fn shape_sheet_rows(
    records: &[Vec<String>],
    indicator: &HeaderIndicator,
    blank_corner: bool,
) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = Vec::with_capacity(records.len());

    for record in records {
        if !out.is_empty() && record.iter().any(|f| indicator.is_field(f)) {
            continue;
        }
        out.push(record.iter().map(|f| canonical_locale(f)).collect());
    }

    if blank_corner {
        if let Some(corner) = out.first_mut().and_then(|row| row.first_mut()) {
            corner.clear();
        }
    }
    out
}

/// Sheet writer producing a CSV or TSV file where every cell is literal text.
#[derive(Clone, Debug)]
pub struct DelimitedSheet {
    opts: SheetOptions,
    indicator: HeaderIndicator,
}

impl DelimitedSheet {
    pub fn new(opts: SheetOptions, indicator: HeaderIndicator) -> Self {
        Self { opts, indicator }
    }

    /// `guide.html` → `guide.tsv` (or `.csv`)
    pub fn sheet_path(&self, source: &Path) -> PathBuf {
        with_replaced_extension(source, self.opts.format.ext())
    }
}

impl SheetWriter for DelimitedSheet {
    fn write_sheet(&self, source: &Path, records: &[Vec<String>]) -> Result<PathBuf> {
        let rows = shape_sheet_rows(records, &self.indicator, self.opts.blank_corner);
        let path = self.sheet_path(source);

        write_atomic(&path, |w| {
            let mut out = record_writer(w, self.opts.format);
            for row in &rows {
                out.write_record(row)
                    .map_err(|source| Error::Csv { path: path.clone(), source })?;
            }
            out.flush()
                .map_err(|source| Error::Write { path: path.clone(), source })
        })?;

        log::debug!("{}: sheet with {} row(s)", path.display(), rows.len());
        Ok(path)
    }
}
