// src/config/consts.rs

// Selection
pub const DEFAULT_HEADER_INDICATOR: &str = "key";
pub const DEFAULT_TABLE_SELECTOR: &str = "div.table-wrap > table";

// Span attributes are clamped to the limits browsers apply
pub const MAX_COLSPAN: usize = 1000;
pub const MAX_ROWSPAN: usize = 65534;

// Discovery
pub const SOURCE_EXT: &str = "html";

// Sheet writer: locale codes written in canonical lower case
pub const LOCALE_CODES: [&str; 3] = ["en", "ja", "ko"];

// Config / logging
pub const DEFAULT_CONFIG_FILE: &str = "tablegrid.conf";
pub const DEFAULT_LOG_FILE: &str = "log.txt";

// Concurrency
pub const WORKERS: usize = 4;
