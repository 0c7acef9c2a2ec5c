// src/html.rs
// Read-only access to table markup on top of `scraper`.
// Only direct structure is followed (table > thead/tbody > tr > td/th), so a
// table nested inside a cell never leaks rows or cells into its parent.

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{MAX_COLSPAN, MAX_ROWSPAN};
use crate::error::{Error, Result};
use crate::grid::SpanCell;
use crate::normalize;

pub fn parse_document(text: &str) -> Html {
    Html::parse_document(text)
}

/// Compile a CSS selector, keeping the offending text in the error.
pub fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e}")))
}

#[inline]
fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

#[inline]
fn named(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().name() == name
}

/// Rows that take part in the grid: header group rows first, then body
/// rows (including bare `<tr>` children) in document order. Footer rows
/// are not part of the grid.
pub fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut head = Vec::new();
    let mut body = Vec::new();

    for child in child_elements(table) {
        match child.value().name() {
            "thead" => head.extend(child_elements(child).filter(|r| named(r, "tr"))),
            "tbody" => body.extend(child_elements(child).filter(|r| named(r, "tr"))),
            "tr" => body.push(child),
            _ => {}
        }
    }

    head.extend(body);
    head
}

/// Direct `<td>`/`<th>` children of a row, in markup order.
pub fn row_cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    child_elements(row)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
        .collect()
}

/// Number of `<tbody>` groups directly under the table.
pub fn body_group_count(table: ElementRef<'_>) -> usize {
    child_elements(table).filter(|c| named(c, "tbody")).count()
}

/// Every `<th>` in the table, wherever it sits.
pub fn header_cells<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| named(el, "th"))
}

/// Span attribute value, read the way a lenient integer conversion would:
/// surrounding whitespace is ignored and leading digits are taken, so
/// `"2"` and `"2px"` are 2. Missing, empty, non-numeric, negative and zero
/// values all mean 1. Values above `max`, including ones too long for a
/// `usize`, are clamped to `max`.
pub fn parse_span(raw: Option<&str>, max: usize) -> usize {
    let Some(raw) = raw else { return 1 };
    let raw = raw.trim();
    let digits = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(raw, |(ix, _)| &raw[..ix]);

    if digits.is_empty() {
        return 1;
    }
    match digits.parse::<usize>() {
        Ok(0) => 1,
        Ok(n) => n.min(max).max(1),
        // only overflow is left once the digits are known to be ASCII
        Err(_) => max.max(1),
    }
}

/// A markup cell as seen by the grid builder.
#[derive(Clone, Copy, Debug)]
pub struct HtmlCell<'a>(pub ElementRef<'a>);

impl SpanCell for HtmlCell<'_> {
    fn colspan(&self) -> usize {
        parse_span(self.0.value().attr("colspan"), MAX_COLSPAN)
    }

    fn rowspan(&self) -> usize {
        parse_span(self.0.value().attr("rowspan"), MAX_ROWSPAN)
    }

    fn text(&self) -> String {
        normalize::cell_text(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_values() {
        assert_eq!(parse_span(None, 10), 1);
        assert_eq!(parse_span(Some("3"), 10), 3);
        assert_eq!(parse_span(Some(" 2 "), 10), 2);
        assert_eq!(parse_span(Some("2px"), 10), 2);
        assert_eq!(parse_span(Some(""), 10), 1);
        assert_eq!(parse_span(Some("0"), 10), 1);
        assert_eq!(parse_span(Some("-2"), 10), 1);
        assert_eq!(parse_span(Some("two"), 10), 1);
    }

    #[test]
    fn span_values_clamped() {
        assert_eq!(parse_span(Some("11"), 10), 10);
        assert_eq!(parse_span(Some("18446744073709551615"), MAX_COLSPAN), MAX_COLSPAN);
        assert_eq!(parse_span(Some("99999999999999999999999999"), MAX_ROWSPAN), MAX_ROWSPAN);
        assert_eq!(parse_span(Some("5"), 0), 1);
    }

    #[test]
    fn rows_head_first_footer_dropped() {
        let doc = parse_document(
            "<table>\
               <tbody><tr><td>b1</td></tr></tbody>\
               <tfoot><tr><td>f</td></tr></tfoot>\
               <thead><tr><th>h</th></tr></thead>\
             </table>",
        );
        let sel = compile("table").unwrap();
        let table = doc.select(&sel).next().unwrap();

        let rows = table_rows(table);
        let first: Vec<String> = rows
            .iter()
            .map(|r| r.text().collect::<String>())
            .collect();
        assert_eq!(first, vec!["h", "b1"]);
        assert_eq!(body_group_count(table), 1);
        assert_eq!(header_cells(table).count(), 1);
    }

    #[test]
    fn nested_table_cells_stay_out() {
        let doc = parse_document(
            "<table><tr><td>a<table><tr><td>x</td><td>y</td></tr></table></td><td>b</td></tr></table>",
        );
        let sel = compile("body > table").unwrap();
        let table = doc.select(&sel).next().unwrap();
        let rows = table_rows(table);
        assert_eq!(rows.len(), 1);
        assert_eq!(row_cells(rows[0]).len(), 2);
    }

    #[test]
    fn bad_selector_is_reported() {
        assert!(matches!(compile("div[["), Err(Error::Selector(_))));
    }
}
