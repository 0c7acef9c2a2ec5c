// src/runner.rs
// Document → grids → records → sheet, for one file or a whole tree.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crate::{
    config::options::{AppOptions, ExtractOptions},
    discover,
    error::{Error, Result},
    grid::Grid,
    html::parse_document,
    progress::Progress,
    records::{read_records_file, write_records_file},
    select::TableSelector,
    sheet::{DelimitedSheet, SheetWriter},
};

/// What one document produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub tables: usize,
    pub records: usize,
    pub records_path: PathBuf,
    pub sheet_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: Error,
}

/// Summary of a batch, in discovery order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn records(&self) -> usize {
        self.reports.iter().map(|r| r.records).sum()
    }
}

/// Grids of every eligible table in an HTML document, in document order.
/// Tables that resolve to zero columns carry no records and are left out.
pub fn extract_grids(html: &str, opts: &ExtractOptions) -> Result<Vec<Grid>> {
    let selector = TableSelector::new(opts)?;
    let doc = parse_document(html);

    let grids = selector
        .eligible(&doc)
        .map(|table| Grid::from_table(table, opts.column_basis))
        .filter(|grid| {
            let keep = grid.cols() > 0;
            if !keep {
                log::debug!("eligible table with no columns left out");
            }
            keep
        })
        .collect();
    Ok(grids)
}

/// Process one document: write its record file and, when a sheet writer is
/// given and there is something to write, its sheet.
pub fn process_file(
    source: &Path,
    opts: &AppOptions,
    sheet: Option<&dyn SheetWriter>,
) -> Result<FileReport> {
    log::info!("{}: start", source.display());

    let bytes = fs::read(source)
        .map_err(|e| Error::Read { path: source.to_path_buf(), source: e })?;
    let text = String::from_utf8_lossy(&bytes);

    let grids = extract_grids(&text, &opts.extract)?;
    let format = opts.export.record_format;

    let records_path = opts.export.records_path(source);
    let records = write_records_file(&records_path, &grids, format)?;

    let sheet_path = match sheet {
        Some(writer) if records > 0 => {
            let rows = read_records_file(&records_path, format)?;
            Some(writer.write_sheet(source, &rows)?)
        }
        Some(_) => {
            log::info!("{}: no eligible tables, sheet not written", source.display());
            None
        }
        None => None,
    };

    log::info!(
        "{}: {} table(s), {} record(s) → {}{}",
        source.display(),
        grids.len(),
        records,
        records_path.display(),
        sheet_path.as_ref().map(|p| format!(", {}", p.display())).unwrap_or_default(),
    );

    Ok(FileReport {
        source: source.to_path_buf(),
        tables: grids.len(),
        records,
        records_path,
        sheet_path,
    })
}

/// Discover documents under `root` and process them with the sheet writer
/// configured in `opts`.
pub fn run(
    root: &Path,
    opts: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let files = discover::html_files(root)?;
    let sheet = opts
        .export
        .sheet
        .clone()
        .map(|s| DelimitedSheet::new(s, opts.extract.header_indicator.clone()));

    run_files(&files, opts, sheet.as_ref().map(|s| s as &dyn SheetWriter), progress)
}

/// Process `files` on a pool of `opts.run.workers` threads.
///
/// Documents are independent: a failure is logged, reported to `progress`
/// and recorded in the summary, and the rest of the batch continues.
pub fn run_files(
    files: &[PathBuf],
    opts: &AppOptions,
    sheet: Option<&dyn SheetWriter>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(files.len());
    }
    if files.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No HTML files found.");
            p.finish();
        }
        return Ok(RunSummary::default());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.run.workers.max(1))
        .build()?;

    let mut outcomes: Vec<Option<Result<FileReport>>> = (0..files.len()).map(|_| None).collect();

    pool.in_place_scope(|scope| {
        let (tx, rx) = mpsc::channel::<(usize, Result<FileReport>)>();

        for (ix, path) in files.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move |_| {
                let _ = tx.send((ix, process_file(path, opts, sheet)));
            });
        }
        drop(tx); // main thread is the sole receiver now

        for (ix, outcome) in rx {
            match &outcome {
                Ok(report) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(report);
                    }
                }
                Err(err) => {
                    log::error!("{}: {err}", files[ix].display());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&files[ix], err);
                    }
                }
            }
            outcomes[ix] = Some(outcome);
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let mut summary = RunSummary::default();
    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Some(Ok(report)) => summary.reports.push(report),
            Some(Err(error)) => summary.failures.push(FileFailure { source: path.clone(), error }),
            None => {}
        }
    }
    Ok(summary)
}
