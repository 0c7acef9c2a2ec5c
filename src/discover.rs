// src/discover.rs
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::consts::SOURCE_EXT;
use crate::error::Result;

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXT))
}

/// All `*.html` files under `root`, recursively, sorted by path.
///
/// A file given as `root` is returned as is. An unreadable root is an
/// error; unreadable entries below it are logged and skipped.
pub fn html_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() && is_source(entry.path()) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}
