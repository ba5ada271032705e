//! Benchmarks for response normalization.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use draftflow::model::OutlinePoint;
use draftflow::normalize::{finalize_text, parse_structured_list};
use draftflow::provider::Citation;

fn outline_payload(points: usize) -> String {
    let items: Vec<String> = (0..points)
        .map(|i| format!(r#"{{"headline":"Point {i}","what":"w","why":"y","how":"h"}}"#))
        .collect();
    format!("Sure! Here is the outline:\n```json\n[{}]\n```\nLet me know.", items.join(","))
}

fn normalize_benchmark(c: &mut Criterion) {
    let fenced = outline_payload(12);
    c.bench_function("parse_fenced_outline", |b| {
        b.iter(|| parse_structured_list::<OutlinePoint>(black_box(&fenced), Some("point")));
    });

    let malformed = "```json\n[{\"headline\": \"cut off".to_string();
    c.bench_function("parse_malformed", |b| {
        b.iter(|| parse_structured_list::<OutlinePoint>(black_box(&malformed), Some("point")));
    });

    let citations: Vec<Citation> = (0..20)
        .map(|i| Citation::new(format!("https://example.com/{}", i % 5), format!("Source {}", i % 5)))
        .collect();
    let body = "Paragraph.\n\n".repeat(50);
    c.bench_function("finalize_grounded_text", |b| {
        b.iter(|| finalize_text(black_box(&body), black_box(&citations)));
    });
}

criterion_group!(benches, normalize_benchmark);
criterion_main!(benches);
