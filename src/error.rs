// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning a document into records.
///
/// Malformed tables are not errors (they are clipped or skipped); only
/// resource problems and bad configuration end up here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("record stream {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot move finished output into {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walking input tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid table selector `{0}`")]
    Selector(String),

    #[error("{path}:{line}: {msg}")]
    Config {
        path: PathBuf,
        line: usize,
        msg: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
