//! Benchmarks for unocr result handling.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic recognition results and Tesseract TSV.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unocr::{Block, Document, Geometry, JsonFormat, Line, Page, Word};

/// Creates a synthetic document with the given number of pages.
fn create_test_document(page_count: usize) -> Document {
    let pages = (0..page_count)
        .map(|_| {
            let mut page = Page::with_dimensions(1240, 1754);
            for b in 0..10 {
                let lines = (0..8)
                    .map(|l| {
                        let y = (b * 8 + l) as f64 / 100.0;
                        Line::from_words(
                            (0..12)
                                .map(|w| {
                                    let x = w as f64 / 14.0;
                                    Word::new(
                                        format!("word{}", w),
                                        Geometry::from_box(x, y, x + 0.05, y + 0.008),
                                    )
                                })
                                .collect(),
                        )
                    })
                    .collect();
                page.add_block(Block::from_lines(lines));
            }
            page
        })
        .collect();

    Document::from_pages(pages)
}

/// Creates Tesseract TSV output with the given number of lines of five words.
fn create_test_tsv(line_count: usize) -> String {
    let mut tsv = String::from(
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n",
    );
    tsv.push_str("1\t1\t0\t0\t0\t0\t0\t0\t1000\t2000\t-1\t\n");
    tsv.push_str("2\t1\t1\t0\t0\t0\t10\t10\t900\t1900\t-1\t\n");
    tsv.push_str("3\t1\t1\t1\t0\t0\t10\t10\t900\t1900\t-1\t\n");
    for l in 0..line_count {
        let top = 10 + l * 20;
        tsv.push_str(&format!("4\t1\t1\t1\t{}\t0\t10\t{}\t900\t18\t-1\t\n", l + 1, top));
        for w in 0..5 {
            tsv.push_str(&format!(
                "5\t1\t1\t1\t{}\t{}\t{}\t{}\t80\t18\t91.5\tword{}\n",
                l + 1,
                w + 1,
                10 + w * 100,
                top,
                w
            ));
        }
    }
    tsv
}

/// Benchmark JSON export at various sizes.
fn bench_json_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_export");

    for page_count in [1, 5, 10].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| unocr::render::to_json(black_box(&doc), JsonFormat::Pretty).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the console summary.
fn bench_summary(c: &mut Criterion) {
    let doc = create_test_document(5);

    c.bench_function("summary_5_pages", |b| {
        b.iter(|| unocr::render::to_summary(black_box(&doc)).unwrap());
    });
}

/// Benchmark TSV parsing.
fn bench_tsv_parsing(c: &mut Criterion) {
    let tsv = create_test_tsv(200);

    c.bench_function("parse_tsv_200_lines", |b| {
        b.iter(|| unocr::engine::parse_tsv(black_box(&tsv)).unwrap());
    });
}

criterion_group!(benches, bench_json_export, bench_summary, bench_tsv_parsing);
criterion_main!(benches);
