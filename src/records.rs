// src/records.rs
// Grid rows ⇄ delimited text records (the intermediate exchange format).
use std::io::{Read, Write};
use std::path::Path;

use crate::config::options::ExportFormat;
use crate::error::{Error, Result};
use crate::file::write_atomic;
use crate::grid::Grid;

/* ---------------- Writing ---------------- */

/// Record writer: quotes fields only when needed (delimiter, quote, CR/LF),
/// doubles embedded quotes, ends records with `\n`, and accepts records of
/// different widths (consecutive tables rarely agree).
pub fn writer<W: Write>(w: W, format: ExportFormat) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new()
        .delimiter(format.delim())
        .terminator(::csv::Terminator::Any(b'\n'))
        .quote_style(::csv::QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(w)
}

/// Emit one record per grid row, in row order. Returns the record count.
pub fn emit_grid<W: Write>(out: &mut ::csv::Writer<W>, grid: &Grid) -> ::csv::Result<usize> {
    for r in 0..grid.rows() {
        out.write_record(grid.row(r))?;
    }
    Ok(grid.rows())
}

/// Emit several grids back to back into one stream.
pub fn emit_grids<W: Write>(w: W, grids: &[Grid], format: ExportFormat) -> ::csv::Result<usize> {
    let mut out = writer(w, format);
    let mut total = 0;
    for grid in grids {
        total += emit_grid(&mut out, grid)?;
    }
    out.flush()?;
    Ok(total)
}

/// Records as a string, for callers that do not want a file.
pub fn to_record_string(grids: &[Grid], format: ExportFormat) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // writing into a Vec cannot fail
    let _ = emit_grids(&mut buf, grids, format);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// Write the record file for one document atomically.
pub fn write_records_file(path: &Path, grids: &[Grid], format: ExportFormat) -> Result<usize> {
    write_atomic(path, |w| {
        emit_grids(w, grids, format).map_err(|source| Error::Csv { path: path.to_path_buf(), source })
    })
}

/* ---------------- Reading ---------------- */

/// Parse a record stream back into rows of fields.
pub fn read_records<R: Read>(r: R, format: ExportFormat) -> ::csv::Result<Vec<Vec<String>>> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .delimiter(format.delim())
        .has_headers(false)
        .flexible(true)
        .from_reader(r);

    rdr.records()
        .map(|rec| rec.map(|rec| rec.iter().map(String::from).collect()))
        .collect()
}

pub fn read_records_file(path: &Path, format: ExportFormat) -> Result<Vec<Vec<String>>> {
    let file = std::fs::File::open(path)
        .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    read_records(std::io::BufReader::new(file), format)
        .map_err(|source| Error::Csv { path: path.to_path_buf(), source })
}
