// src/progress.rs
use std::path::Path;

use crate::error::Error;
use crate::runner::FileReport;

/// Progress reporting for batch runs. Frontends implement this to surface
/// status; every call happens on the thread that started the run.
pub trait Progress {
    /// Called once with the number of documents found.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line.
    fn log(&mut self, _msg: &str) {}

    /// One document finished.
    fn item_done(&mut self, _report: &FileReport) {}

    /// One document failed; the batch carries on.
    fn item_failed(&mut self, _source: &Path, _err: &Error) {}

    /// Called at the end, whatever happened.
    fn finish(&mut self) {}
}
