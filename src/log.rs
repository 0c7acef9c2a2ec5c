// src/log.rs
// File sink for the `log` facade: `[HH:MM:SS.mmm][LEVEL] message`, where the
// stamp is the time elapsed since the sink was installed.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{Level, LevelFilter, Metadata, Record};

struct FileLog {
    file: Mutex<File>,
    start: Instant,
}

static LOGGER: OnceLock<FileLog> = OnceLock::new();

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

impl log::Log for FileLog {
    fn enabled(&self, meta: &Metadata) -> bool {
        // parser crates are chatty below Info; keep their debug output out
        meta.level() <= log::max_level()
            && (meta.level() <= Level::Info || meta.target().starts_with(env!("CARGO_CRATE_NAME")))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = fmt_elapsed(self.start.elapsed().as_millis());
        let line = format!("[{elapsed}][{}] {}\n", record.level(), record.args());

        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file sink at `path` (appending). Returns `false` when the
/// file cannot be opened, in which case the run continues without a log.
/// Installing twice only updates the level.
pub fn init(path: &Path, level: LevelFilter) -> bool {
    if LOGGER.get().is_none() {
        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(_) => return false,
        };
        let logger = LOGGER.get_or_init(|| FileLog { file: Mutex::new(file), start: Instant::now() });
        // a foreign logger may already own the facade; ours then stays idle
        let _ = log::set_logger(logger);
    }
    log::set_max_level(level);
    true
}
