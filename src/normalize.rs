// src/normalize.rs
//! Cell content → plain text.
//!
//! A cell is read in one of two modes:
//!
//! - **single-line**: the cell has no paragraph-like descendants. All of its
//!   text is concatenated, whitespace runs (newlines included) collapse to
//!   one space, and the result is trimmed.
//! - **multi-line**: the cell holds `<p>`, `<li>`, `<pre>` or `<a>` elements.
//!   Each of them becomes one line: `<br>` turns into a newline, other tags
//!   are dropped, the line is trimmed. Lines are joined with `\n` and one
//!   trailing newline is removed. Text sitting outside those elements is not
//!   part of the value.
//!
//! Only the outermost line elements are lines. An `<a>` inside an `<li>`,
//! or a `<p>` inside an `<li>`, belongs to its container's line. A flat
//! search over every `p, li, pre, a` descendant would instead emit the
//! nested text again as a line of its own; this reader does not.
//!
//! Entities are decoded once, by the parser, in both modes. The result is
//! never absent: an empty cell reads as `""`.

use scraper::{ElementRef, Node};

use crate::core::text::{chomp, collapse_ws};

/// Elements that switch a cell into multi-line mode.
pub const LINE_TAGS: [&str; 4] = ["p", "li", "pre", "a"];

#[inline]
fn is_line_tag(el: &ElementRef<'_>) -> bool {
    LINE_TAGS.contains(&el.value().name())
}

/// Plain-text value of one `<td>`/`<th>`.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    let lines = line_elements(cell);
    if lines.is_empty() {
        single_line(cell)
    } else {
        multi_line(&lines)
    }
}

fn single_line(cell: ElementRef<'_>) -> String {
    collapse_ws(&cell.text().collect::<String>())
}

fn multi_line(lines: &[ElementRef<'_>]) -> String {
    let joined = lines
        .iter()
        .map(|el| line_text(*el).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    chomp(joined)
}

/// Outermost line elements under `cell`, in document order. An `<a>` inside
/// a `<p>` belongs to the paragraph's line and is not read a second time.
fn line_elements<'a>(cell: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let root = *cell;
    cell.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(is_line_tag)
        .filter(|el| {
            !el.ancestors()
                .take_while(|a| *a != root)
                .filter_map(ElementRef::wrap)
                .any(|a| is_line_tag(&a))
        })
        .collect()
}

/// Text of one line element with `<br>` kept as `\n`.
fn line_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) if e.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out
}
