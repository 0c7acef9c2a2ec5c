// tests/batch_run.rs
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use tablegrid::config::options::AppOptions;
use tablegrid::progress::Progress;
use tablegrid::runner::FileReport;
use tablegrid::{run, Error};

const PAGE: &str = "<div class=\"table-wrap\"><table>\
    <tr><th>Key</th><th>en</th><th>ja</th></tr>\
    <tr><td>greeting</td><td>Hello</td><td>こんにちは</td></tr>\
    </table></div>";

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<PathBuf>,
    failed: Vec<PathBuf>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, report: &FileReport) { self.done.push(report.source.clone()); }
    fn item_failed(&mut self, source: &Path, _err: &Error) { self.failed.push(source.to_path_buf()); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn one_bad_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.html"), PAGE).unwrap();
    fs::write(root.join("sub/c.html"), PAGE).unwrap();
    fs::write(root.join("bad.html"), PAGE).unwrap();
    // a directory where the record file has to go
    fs::create_dir(root.join("bad.html.csv")).unwrap();

    let mut opts = AppOptions::default();
    opts.run.workers = 2;
    let mut progress = Recorder::default();
    let summary = run(root, &opts, Some(&mut progress)).unwrap();

    assert_eq!(progress.total, 3);
    assert!(progress.finished);
    assert_eq!(progress.failed, vec![root.join("bad.html")]);
    assert_eq!(progress.done.len(), 2);

    let sources: Vec<_> = summary.reports.iter().map(|r| r.source.clone()).collect();
    assert_eq!(sources, vec![root.join("a.html"), root.join("sub/c.html")]);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.records(), 4);

    assert_eq!(
        fs::read_to_string(root.join("a.html.csv")).unwrap(),
        "Key,en,ja\ngreeting,Hello,こんにちは\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("sub/c.tsv")).unwrap(),
        "\ten\tja\ngreeting\tHello\tこんにちは\n"
    );
    assert!(!root.join("bad.tsv").exists());
}

#[test]
fn records_only_when_sheet_disabled() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.html"), PAGE).unwrap();

    let mut opts = AppOptions::default();
    opts.export.sheet = None;
    let summary = run(dir.path(), &opts, None).unwrap();

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].sheet_path, None);
    assert!(dir.path().join("a.html.csv").exists());
    assert!(!dir.path().join("a.tsv").exists());
}

#[test]
fn empty_tree_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut progress = Recorder::default();
    let summary = run(dir.path(), &AppOptions::default(), Some(&mut progress)).unwrap();
    assert!(summary.reports.is_empty());
    assert_eq!(progress.total, 0);
    assert!(progress.finished);
}
