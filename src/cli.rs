// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::{
    config::{
        consts::DEFAULT_CONFIG_FILE,
        file as config_file,
        options::{AppOptions, ColumnBasis, ExportFormat, HeaderIndicator, SheetOptions},
    },
    error::Error,
    progress::Progress,
    runner::{self, FileReport},
};

/// Flatten merged HTML glossary tables into CSV/TSV.
///
/// Every `*.html` under ROOT is read; eligible tables are rebuilt as
/// rectangular grids and written to `<file>.html.csv`, then shaped into a
/// sheet written next to the source.
#[derive(Parser, Debug)]
#[command(name = "tablegrid", version, about)]
pub struct Args {
    /// Directory to scan, or a single HTML file
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// key=value config file (default: ./tablegrid.conf when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Header text that marks a glossary table (case-insensitive substring)
    #[arg(long, value_name = "TEXT", value_parser = non_blank)]
    pub header_indicator: Option<String>,

    /// CSS selector for candidate tables
    #[arg(long, value_name = "CSS")]
    pub table_selector: Option<String>,

    /// How the grid width is decided
    #[arg(long, value_enum)]
    pub columns: Option<Columns>,

    /// Format of the intermediate record file
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Format of the sheet file
    #[arg(long, value_enum)]
    pub sheet_format: Option<Format>,

    /// Stop after the record file
    #[arg(long)]
    pub no_sheet: bool,

    /// Keep the top-left header cell in the sheet
    #[arg(long)]
    pub keep_corner: bool,

    /// Documents processed in parallel
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Log file
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn non_blank(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err(s!("must contain non-whitespace text"))
    } else {
        Ok(s!(s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f { Format::Csv => ExportFormat::Csv, Format::Tsv => ExportFormat::Tsv }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Columns {
    FirstRow,
    Widest,
}

impl From<Columns> for ColumnBasis {
    fn from(c: Columns) -> Self {
        match c { Columns::FirstRow => ColumnBasis::FirstRowCells, Columns::Widest => ColumnBasis::WidestRow }
    }
}

/// Defaults, then the config file, then flags.
pub fn resolve_options(args: &Args) -> Result<AppOptions, Error> {
    let mut opts = AppOptions::default();

    match &args.config {
        Some(path) => config_file::load_into(path, &mut opts)?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                config_file::load_into(default, &mut opts)?;
            }
        }
    }

    apply_args(args, &mut opts);
    Ok(opts)
}

fn apply_args(args: &Args, opts: &mut AppOptions) {
    if let Some(text) = args.header_indicator.as_deref() {
        opts.extract.header_indicator = HeaderIndicator::new(text);
    }
    if let Some(css) = &args.table_selector {
        opts.extract.table_selector = css.clone();
    }
    if let Some(c) = args.columns {
        opts.extract.column_basis = c.into();
    }
    if let Some(f) = args.format {
        opts.export.record_format = f.into();
    }

    if args.no_sheet {
        opts.export.sheet = None;
    } else if args.sheet_format.is_some() || args.keep_corner {
        let sheet = opts.export.sheet.get_or_insert_with(SheetOptions::default);
        if let Some(f) = args.sheet_format {
            sheet.format = f.into();
        }
        if args.keep_corner {
            sheet.blank_corner = false;
        }
    }

    if let Some(n) = args.jobs {
        opts.run.workers = usize::from(n);
    }
    if let Some(path) = &args.log {
        opts.run.log_file = path.clone();
    }
    opts.run.verbose |= args.verbose;
}

/// One line per document on stdout, failures on stderr.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, report: &FileReport) {
        self.seen += 1;
        let sheet = report
            .sheet_path
            .as_ref()
            .map(|p| format!(" → {}", p.display()))
            .unwrap_or_default();
        println!(
            "[{}/{}] {}: {} table(s), {} record(s){sheet}",
            self.seen, self.total, report.source.display(), report.tables, report.records
        );
    }

    fn item_failed(&mut self, source: &Path, err: &Error) {
        self.seen += 1;
        eprintln!("[{}/{}] {}: FAILED: {err}", self.seen, self.total, source.display());
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    let opts = resolve_options(&args)?;

    let level = if opts.run.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if !crate::log::init(&opts.run.log_file, level) {
        eprintln!("Warning: cannot open log file {}; continuing without it", opts.run.log_file.display());
    }

    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&args.root, &opts, Some(&mut progress))?;

    println!(
        "Done: {} file(s), {} record(s), {} failure(s)",
        summary.reports.len(),
        summary.records(),
        summary.failures.len()
    );
    if !summary.failures.is_empty() {
        println!("See {} for details.", opts.run.log_file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tablegrid").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "docs", "--header-indicator", "Term", "--columns", "widest",
            "--format", "tsv", "--sheet-format", "csv", "--keep-corner", "-j", "2", "-v",
        ]);
        let mut opts = AppOptions::default();
        apply_args(&args, &mut opts);

        assert_eq!(args.root, PathBuf::from("docs"));
        assert_eq!(opts.extract.header_indicator.as_str(), "term");
        assert_eq!(opts.extract.column_basis, ColumnBasis::WidestRow);
        assert_eq!(opts.export.record_format, ExportFormat::Tsv);
        let sheet = opts.export.sheet.as_ref().unwrap();
        assert_eq!(sheet.format, ExportFormat::Csv);
        assert!(!sheet.blank_corner);
        assert_eq!(opts.run.workers, 2);
        assert!(opts.run.verbose);
    }

    #[test]
    fn no_sheet_wins() {
        let args = parse(&["--no-sheet", "--sheet-format", "csv"]);
        let mut opts = AppOptions::default();
        apply_args(&args, &mut opts);
        assert!(opts.export.sheet.is_none());
    }

    #[test]
    fn blank_header_indicator_rejected() {
        for blank in ["", "   ", "\t"] {
            assert!(Args::try_parse_from(["tablegrid", "--header-indicator", blank]).is_err());
        }
        assert_eq!(parse(&["--header-indicator", " Key "]).header_indicator.as_deref(), Some(" Key "));
    }

    #[test]
    fn zero_jobs_rejected() {
        assert!(Args::try_parse_from(["tablegrid", "-j", "0"]).is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let args = parse(&["--config", "/definitely/not/here.conf"]);
        assert!(matches!(resolve_options(&args), Err(Error::Read { .. })));
    }
}
