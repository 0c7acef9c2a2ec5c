// src/config/file.rs
// `key = value` config file, applied on top of the built-in defaults.
use std::{fs, path::{Path, PathBuf}};

use super::options::{AppOptions, ColumnBasis, ExportFormat, HeaderIndicator};
use crate::error::{Error, Result};

/// Load `path` into `opts`. A missing file is an error; callers that treat
/// the file as optional check for it first.
pub fn load_into(path: &Path, opts: &mut AppOptions) -> Result<()> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    apply(&text, path, opts)
}

/// Apply config text; `origin` is only used in error messages.
pub fn apply(text: &str, origin: &Path, opts: &mut AppOptions) -> Result<()> {
    // sheet settings survive `sheet = false`, so key order does not matter
    let mut sheet_on = opts.export.sheet.is_some();
    let mut sheet = opts.export.sheet.clone().unwrap_or_default();

    for (ix, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }

        let bad = |msg: String| Error::Config { path: origin.to_path_buf(), line: ix + 1, msg };

        let Some((key, val)) = line.split_once('=') else {
            return Err(bad(format!("expected `key = value`, got `{line}`")));
        };
        let (key, val) = (key.trim(), val.trim());

        match key {
            "header_indicator" => {
                if val.is_empty() { return Err(bad(s!("header_indicator must not be empty"))); }
                opts.extract.header_indicator = HeaderIndicator::new(val);
            }
            "table_selector" => opts.extract.table_selector = val.to_string(),
            "column_basis" => {
                opts.extract.column_basis = ColumnBasis::parse(val)
                    .ok_or_else(|| bad(format!("unknown column_basis `{val}`")))?;
            }
            "record_format" => {
                opts.export.record_format = ExportFormat::parse(val)
                    .ok_or_else(|| bad(format!("unknown record_format `{val}`")))?;
            }
            "sheet" => {
                sheet_on = parse_bool(val).ok_or_else(|| bad(format!("expected a boolean, got `{val}`")))?;
            }
            "sheet_format" => {
                sheet.format = ExportFormat::parse(val)
                    .ok_or_else(|| bad(format!("unknown sheet_format `{val}`")))?;
            }
            "blank_corner" => {
                sheet.blank_corner = parse_bool(val).ok_or_else(|| bad(format!("expected a boolean, got `{val}`")))?;
            }
            "workers" => {
                opts.run.workers = val.parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| bad(format!("workers must be a positive integer, got `{val}`")))?;
            }
            "log_file" => opts.run.log_file = PathBuf::from(val),
            other => log::debug!("{}: ignoring unknown key `{other}`", origin.display()),
        }
    }

    opts.export.sheet = sheet_on.then_some(sheet);
    Ok(())
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
