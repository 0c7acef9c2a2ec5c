// src/grid.rs
//! Merge-free grid reconstruction.
//!
//! A table's markup lists cells in reading order, but a `rowspan` from an
//! earlier row occupies a column in later rows that have no cell for it.
//! [`GridBuilder`] reconciles the two in one forward pass:
//!
//! 1. the grid is allocated up front with every position unset;
//! 2. for each cell of the current row, the column cursor first skips
//!    positions already filled by an earlier span (slot-skip);
//! 3. the cell's value is written to its position and replicated over the
//!    rectangle its `colspan` × `rowspan` covers, clipped to the grid;
//! 4. the cursor moves one column right; the next slot-skip steps over
//!    whatever this cell's colspan just filled.
//!
//! Positions are written at most once (first writer wins), nothing is ever
//! written outside the grid, and a cell that finds no free column is
//! dropped. Malformed tables degrade, they do not fail.

use scraper::ElementRef;

use crate::config::consts::MAX_COLSPAN;
use crate::config::options::ColumnBasis;
use crate::html::{self, HtmlCell};

/// What the builder needs from a markup cell. `text` is only called for
/// cells that actually land in the grid.
pub trait SpanCell {
    fn colspan(&self) -> usize;
    fn rowspan(&self) -> usize;
    fn text(&self) -> String;
}

/// A cell that already carries its text; handy outside of HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlainCell {
    pub text: String,
    pub colspan: usize,
    pub rowspan: usize,
}

impl PlainCell {
    pub fn new(text: &str) -> Self {
        Self { text: s!(text), colspan: 1, rowspan: 1 }
    }

    pub fn span(mut self, colspan: usize, rowspan: usize) -> Self {
        self.colspan = colspan;
        self.rowspan = rowspan;
        self
    }
}

impl SpanCell for PlainCell {
    fn colspan(&self) -> usize { self.colspan }
    fn rowspan(&self) -> usize { self.rowspan }
    fn text(&self) -> String { self.text.clone() }
}

/// Rectangular `rows × cols` grid of strings, row-major.
///
/// `None` is the unset marker and is distinct from an empty string, so a
/// grid can tell whether every position was assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<String>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![None; rows * cols] }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    #[inline]
    fn index(&self, r: usize, c: usize) -> Option<usize> {
        (r < self.rows && c < self.cols).then(|| r * self.cols + c)
    }

    /// Value at `(r, c)`; `None` when unset or out of bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<&str> {
        self.index(r, c).and_then(|ix| self.cells[ix].as_deref())
    }

    pub fn is_set(&self, r: usize, c: usize) -> bool {
        self.get(r, c).is_some()
    }

    /// Write `value` at `(r, c)` unless the position is taken or outside the
    /// grid. Returns whether it was written.
    pub fn fill(&mut self, r: usize, c: usize, value: &str) -> bool {
        match self.index(r, c) {
            Some(ix) if self.cells[ix].is_none() => {
                self.cells[ix] = Some(s!(value));
                true
            }
            _ => false,
        }
    }

    pub fn unset_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Every position holds a value.
    pub fn is_complete(&self) -> bool {
        self.unset_count() == 0
    }

    /// One row's values; unset positions read as `""`.
    pub fn row(&self, r: usize) -> impl Iterator<Item = &str> + '_ {
        let start = r.min(self.rows) * self.cols;
        let end = if r < self.rows { start + self.cols } else { start };
        self.cells[start..end].iter().map(|c| c.as_deref().unwrap_or(""))
    }

    /// Owned copy of all rows.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|r| self.row(r).map(String::from).collect())
            .collect()
    }

    /// Build the grid of one table element.
    pub fn from_table(table: ElementRef<'_>, basis: ColumnBasis) -> Grid {
        let rows = html::table_rows(table);
        let cells: Vec<Vec<HtmlCell<'_>>> = rows
            .into_iter()
            .map(|row| html::row_cells(row).into_iter().map(HtmlCell).collect())
            .collect();

        let cols = column_count(&cells, basis);
        let mut builder = GridBuilder::new(cells.len(), cols);
        for row in cells {
            builder.push_row(row);
        }
        builder.finish()
    }
}

/// Grid width for a table's rows under `basis`.
pub fn column_count<C: SpanCell>(rows: &[Vec<C>], basis: ColumnBasis) -> usize {
    match basis {
        ColumnBasis::FirstRowCells => rows.first().map_or(0, Vec::len),
        ColumnBasis::WidestRow => rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.colspan().clamp(1, MAX_COLSPAN))
                    .fold(0usize, usize::saturating_add)
            })
            .max()
            .unwrap_or(0),
    }
}

/// Single forward pass over a table's rows; see the module docs.
#[derive(Debug)]
pub struct GridBuilder {
    grid: Grid,
    row: usize,
    dropped_cells: usize,
    clipped_spans: usize,
}

impl GridBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { grid: Grid::new(rows, cols), row: 0, dropped_cells: 0, clipped_spans: 0 }
    }

    /// Place the next markup row.
    pub fn push_row<C, I>(&mut self, cells: I)
    where
        C: SpanCell,
        I: IntoIterator<Item = C>,
    {
        let r = self.row;
        self.row += 1;
        let (rows, cols) = (self.grid.rows, self.grid.cols);

        let mut c = 0;
        for cell in cells {
            // slot-skip past positions an earlier span already owns
            while c < cols && self.grid.is_set(r, c) {
                c += 1;
            }
            if r >= rows || c >= cols {
                self.dropped_cells += 1;
                continue;
            }

            let value = cell.text();
            let (colspan, rowspan) = (cell.colspan().max(1), cell.rowspan().max(1));
            let (row_end, col_end) = (r.saturating_add(rowspan), c.saturating_add(colspan));
            if row_end > rows || col_end > cols {
                self.clipped_spans += 1;
            }

            for rr in r..row_end.min(rows) {
                for cc in c..col_end.min(cols) {
                    self.grid.fill(rr, cc, &value);
                }
            }

            c += 1;
        }
    }

    /// Close the pass. Positions nothing reached (short rows) become `""`,
    /// so the returned grid is always complete.
    pub fn finish(mut self) -> Grid {
        let unset = self.grid.unset_count();
        if self.dropped_cells + self.clipped_spans + unset > 0 {
            log::debug!(
                "grid {}x{}: {} cell(s) dropped, {} span(s) clipped, {} position(s) padded",
                self.grid.rows, self.grid.cols, self.dropped_cells, self.clipped_spans, unset
            );
        }
        for slot in self.grid.cells.iter_mut().filter(|c| c.is_none()) {
            *slot = Some(s!());
        }
        self.grid
    }
}
