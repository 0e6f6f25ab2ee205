use criterion::{criterion_group, criterion_main, Criterion};
use ics_core::{CalendarDocument, CalendarProperties, TimestampSet};
use std::hint::black_box;

const ZONES: &[&str] = &["Europe/Zurich", "America/Caracas", "Asia/Tokyo", "UTC"];

fn dates(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:00 {}",
                2000 + i % 30,
                1 + i % 12,
                1 + i % 28,
                i % 24,
                i % 60,
                ZONES[i % ZONES.len()]
            )
        })
        .collect()
}

fn bench_min_max(c: &mut Criterion) {
    let set = TimestampSet::new();
    let entries = dates(500);
    c.bench_function("min_max_500", |b| {
        b.iter(|| set.min_max(black_box(&entries)).unwrap())
    });
}

fn bench_generate(c: &mut Criterion) {
    let doc = CalendarDocument::new(CalendarProperties {
        timezone: "Europe/Zurich".to_string(),
        product_identifier: "bench".to_string(),
        summary: "Weekly sync".to_string(),
        description: "Agenda, notes; and a fairly long description that needs folding ".repeat(3),
        dates_list: dates(500),
        uuid: "bench-seed".to_string(),
        url: None,
    });
    c.bench_function("generate_500", |b| b.iter(|| doc.generate().unwrap()));
}

criterion_group!(benches, bench_min_max, bench_generate);
criterion_main!(benches);
