// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub mod discover;
pub mod file;
pub mod grid;
pub mod html;
pub mod log;
pub mod normalize;
pub mod progress;
pub mod records;
pub mod runner;
pub mod select;
pub mod sheet;

pub use error::{Error, Result};
pub use grid::Grid;
pub use runner::{extract_grids, process_file, run, RunSummary};
