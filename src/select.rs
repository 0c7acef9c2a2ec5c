// src/select.rs
// Which tables of a document get extracted.
use scraper::{ElementRef, Html, Selector};

use crate::config::options::{ExtractOptions, HeaderIndicator};
use crate::error::Result;
use crate::html::{self, body_group_count, header_cells};

/// Why a candidate table was passed over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skip {
    /// Two or more `<tbody>` groups: a layout this tool does not read.
    BodyGroups(usize),
    /// No header cell mentions the header indicator.
    NoHeaderIndicator,
}

/// Filters the tables found under the configured container selector.
///
/// A table is eligible when it has at most one body group and at least one
/// `<th>` whose text, lower-cased, contains the header indicator.
#[derive(Debug)]
pub struct TableSelector {
    tables: Selector,
    indicator: HeaderIndicator,
}

impl TableSelector {
    pub fn new(opts: &ExtractOptions) -> Result<Self> {
        Ok(Self {
            tables: html::compile(&opts.table_selector)?,
            indicator: opts.header_indicator.clone(),
        })
    }

    pub fn check(&self, table: ElementRef<'_>) -> std::result::Result<(), Skip> {
        let groups = body_group_count(table);
        if groups > 1 {
            return Err(Skip::BodyGroups(groups));
        }
        if !header_cells(table).any(|th| self.indicator.found_in(&th.text().collect::<String>())) {
            return Err(Skip::NoHeaderIndicator);
        }
        Ok(())
    }

    /// Eligible tables of `doc`, in document order. Lazy; calling it again
    /// on the same document yields the same sequence.
    pub fn eligible<'a>(&'a self, doc: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        doc.select(&self.tables)
            .enumerate()
            .filter_map(move |(ix, table)| match self.check(table) {
                Ok(()) => Some(table),
                Err(skip) => {
                    log::debug!("table #{ix} skipped: {skip:?}");
                    None
                }
            })
    }
}
