// benches/grid.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tablegrid::config::options::{ColumnBasis, ExportFormat, ExtractOptions};
use tablegrid::extract_grids;
use tablegrid::records::to_record_string;

/// A glossary page with `tables` tables of `rows` rows each; every third row
/// opens a three-row span in the second column and every fifth row spans
/// the last two columns.
fn synthetic_page(tables: usize, rows: usize) -> String {
    let mut html = String::from("<html><body>");
    for t in 0..tables {
        html.push_str("<div class=\"table-wrap\"><table><thead><tr><th>Key</th><th>en</th><th>ja</th><th>ko</th></tr></thead><tbody>");
        let mut covered = 0;
        for r in 0..rows {
            html.push_str("<tr>");
            html.push_str(&format!("<td>key_{t}_{r}</td>"));
            if covered == 0 {
                if r % 3 == 0 {
                    html.push_str(&format!("<td rowspan=\"3\"><p>shared {r}<br>line two</p></td>"));
                    covered = 2;
                } else {
                    html.push_str(&format!("<td>en {r}</td>"));
                }
            } else {
                covered -= 1;
            }
            if r % 5 == 0 {
                html.push_str("<td colspan=\"2\">both</td>");
            } else {
                html.push_str(&format!("<td>ja &amp; {r}</td><td>  ko\n {r} </td>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></div>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_grid(c: &mut Criterion) {
    let page = synthetic_page(8, 250);
    let first_row = ExtractOptions::default();
    let widest = ExtractOptions { column_basis: ColumnBasis::WidestRow, ..ExtractOptions::default() };

    c.bench_function("extract_first_row", |b| {
        b.iter(|| {
            let grids = extract_grids(black_box(&page), &first_row).unwrap();
            black_box(grids.len())
        })
    });

    c.bench_function("extract_widest", |b| {
        b.iter(|| {
            let grids = extract_grids(black_box(&page), &widest).unwrap();
            black_box(grids.len())
        })
    });

    let grids = extract_grids(&page, &first_row).unwrap();
    c.bench_function("emit_csv", |b| {
        b.iter(|| black_box(to_record_string(black_box(&grids), ExportFormat::Csv).len()))
    });
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
