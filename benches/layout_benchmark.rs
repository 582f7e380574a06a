//! Benchmarks for layout analysis and DOCX assembly.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic text runs, so no PDF parsing is measured here.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf2word::{
    repair_hyphenation, DocumentAssembler, DocxWriter, PageParagraphs, ParagraphSegmenter,
    TextRun,
};

/// A page of runs: a heading, wrapped body paragraphs and a short list.
fn synthetic_page(paragraphs: usize) -> Vec<TextRun> {
    let mut runs = vec![TextRun::new("Section overview", 72.0, 60.0, 20.0, "Helvetica-Bold")];
    let mut y = 100.0;

    for p in 0..paragraphs {
        for line in 0..4 {
            let text = if line == 3 {
                format!("ends paragraph {} with a hyphen-", p)
            } else {
                "wrapped body text continues across the line".to_string()
            };
            runs.push(TextRun::new(text, 72.0, y, 11.0, "Helvetica"));
            y += 13.0;
        }
        y += 20.0;
    }

    for item in 0..3 {
        runs.push(TextRun::new(
            format!("• list entry {}", item),
            72.0,
            y,
            11.0,
            "Helvetica",
        ));
        y += 24.0;
    }

    runs
}

/// Benchmark segmentation and classification at various page sizes.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    let segmenter = ParagraphSegmenter::new();

    for paragraphs in [5, 20, 50].iter() {
        let runs = synthetic_page(*paragraphs);

        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| segmenter.segment(black_box(&runs)));
        });
    }

    group.finish();
}

/// Benchmark hyphenation repair on a long wrapped text.
fn bench_hyphenation(c: &mut Criterion) {
    let text = "The exam-\nple shows wrapped\nlines and Capital\nStarts. ".repeat(200);

    c.bench_function("repair_hyphenation", |b| {
        b.iter(|| repair_hyphenation(black_box(&text)));
    });
}

/// Benchmark block assembly and DOCX serialization.
fn bench_assembly(c: &mut Criterion) {
    let segmenter = ParagraphSegmenter::new();
    let pages: Vec<PageParagraphs> = (1..=10)
        .map(|n| PageParagraphs::new(n, segmenter.segment(&synthetic_page(10))))
        .collect();

    c.bench_function("assemble_and_serialize_10_pages", |b| {
        b.iter(|| {
            let doc = DocumentAssembler::new().build(black_box(&pages));
            DocxWriter::new().serialize(&doc).unwrap()
        });
    });
}

criterion_group!(benches, bench_segmentation, bench_hyphenation, bench_assembly);
criterion_main!(benches);
