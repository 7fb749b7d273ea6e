//! Benchmarks for the typesetting pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typeset_engine::{
    count_pages, layout, scan, LayoutConfig, PageCountCache, ScanOptions, Typesetter,
};

fn default_config() -> LayoutConfig {
    LayoutConfig::default()
}

/// A novel-sized document: `chapters` chapters of mixed-length paragraphs
fn build_document(chapters: usize) -> String {
    let mut doc = String::new();
    for c in 0..chapters {
        doc.push_str(&format!("# Chapter {}\n\n", c + 1));
        for p in 0..60 {
            doc.push_str(&format!(
                "Paragraph {} of chapter {} contains enough text to span multiple lines and exercise the wrapping pass. ",
                p, c
            ));
            if p % 4 == 0 {
                doc.push_str("陆江仙做了一个很长很长的梦，梦见田间种稻，梦见刀光剑影。");
            }
            doc.push_str("\n\n");
        }
    }
    doc
}

fn bench_scan(c: &mut Criterion) {
    let doc = build_document(200);
    let options = ScanOptions::default();
    c.bench_function("scan_200_chapters", |b| {
        b.iter(|| black_box(scan(black_box(&doc), &options)));
    });
}

fn bench_layout_chapter(c: &mut Criterion) {
    let doc = build_document(1);
    let config = default_config();
    c.bench_function("layout_single_chapter", |b| {
        b.iter(|| black_box(layout(black_box(&doc), &config)));
    });
}

fn bench_count_pages_chapter(c: &mut Criterion) {
    let doc = build_document(1);
    let config = default_config();
    c.bench_function("count_pages_single_chapter", |b| {
        b.iter(|| black_box(count_pages(black_box(&doc), &config)));
    });
}

fn bench_paginate_document(c: &mut Criterion) {
    let doc = build_document(50);
    let typesetter = Typesetter::default();
    c.bench_function("paginate_document_50_chapters", |b| {
        b.iter(|| black_box(typesetter.paginate_document(black_box(&doc))));
    });
}

fn bench_paginate_chapter(c: &mut Criterion) {
    let doc = build_document(200);
    let typesetter = Typesetter::default();
    c.bench_function("paginate_chapter_of_200", |b| {
        b.iter(|| black_box(typesetter.paginate_chapter(black_box(&doc), 150)));
    });
}

fn bench_paginate_chapter_cached(c: &mut Criterion) {
    let doc = build_document(200);
    let typesetter = Typesetter::default();
    let mut cache = PageCountCache::new();
    c.bench_function("paginate_chapter_of_200_cached", |b| {
        let mut chapter = 0;
        b.iter(|| {
            chapter = (chapter + 1) % 200;
            black_box(typesetter.paginate_chapter_cached(&mut cache, black_box(&doc), chapter))
        });
    });
}

criterion_group!(
    benches,
    bench_scan,
    bench_layout_chapter,
    bench_count_pages_chapter,
    bench_paginate_document,
    bench_paginate_chapter,
    bench_paginate_chapter_cached,
);
criterion_main!(benches);
