// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Directory a file lives in, `.` for bare file names.
pub fn parent_dir_or_dot(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Write {
            path: dir.to_path_buf(),
            source: std::io::Error::other("path exists but is not a directory"),
        });
    }
    fs::create_dir_all(dir).map_err(|source| Error::Write { path: dir.to_path_buf(), source })
}

/// Write `dest` all-or-nothing.
///
/// `fill` writes into a temporary sibling; only when it returns `Ok` and the
/// buffer flushes is the temporary renamed over `dest`. On any error the
/// temporary is removed and `dest` is left as it was.
pub fn write_atomic<T, F>(dest: &Path, fill: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T>,
{
    let dir = parent_dir_or_dot(dest);
    ensure_directory(dir)?;

    let write_err = |source| Error::Write { path: dest.to_path_buf(), source };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    let out = {
        let mut w = BufWriter::new(tmp.as_file_mut());
        let out = fill(&mut w)?;
        w.flush().map_err(write_err)?;
        out
    };

    tmp.persist(dest)
        .map_err(|e| Error::Persist { path: dest.to_path_buf(), source: e.error })?;
    Ok(out)
}

/// `guide.html` → `guide.<ext>`
pub fn with_replaced_extension(source: &Path, ext: &str) -> PathBuf {
    source.with_extension(ext)
}
