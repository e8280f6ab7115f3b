//! Criterion benchmarks for kazsearch.
//!
//! Covers the three hot paths:
//! - Text analysis
//! - Indexing a batch of messages
//! - Query evaluation (term, parsed, fuzzy, range)

use std::hint::black_box;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use kazsearch::analysis::analyzer::AnalyzerKind;
use kazsearch::index::config::IndexConfig;
use kazsearch::message::indexer::MessageIndexer;
use kazsearch::message::model::Message;
use kazsearch::message::search::DateFilter;

const WORDS: &[&str] = &[
    "корреспондент", "сообщает", "дорога", "снег", "мороз", "астана", "алматы", "тима",
    "приехал", "уехал", "поезд", "погода", "ветер", "новости", "область", "жол", "қала",
    "ауа", "райы", "хабарлайды",
];

const REGIONS: &[&str] = &["Астана", "ALMATY_REGION", "Караганда", "Шымкент"];

/// Generate deterministic test messages.
fn generate_messages(count: usize) -> Vec<Message> {
    (0..count)
        .map(|i| {
            let body: Vec<&str> = (0..40 + i % 60)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect();
            let title: Vec<&str> = (0..4).map(|j| WORDS[(i * 3 + j * 5) % WORDS.len()]).collect();
            Message::new(
                title.join(" "),
                body.join(" "),
                [REGIONS[i % REGIONS.len()]],
                format!("Feb {}, 2016 {}:30:00 PM", 1 + i % 28, 1 + i % 12),
            )
        })
        .collect()
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let analyzer = AnalyzerKind::Russian.build().unwrap();
    let messages = generate_messages(100);

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("tokenize_bodies", |b| {
        b.iter(|| {
            for message in &messages {
                black_box(analyzer.tokenize(black_box(&message.body)).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    group.sample_size(20);
    let messages = generate_messages(1000);

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("index_1000_messages", |b| {
        b.iter_batched(
            || MessageIndexer::in_memory(IndexConfig::default()).unwrap(),
            |indexer| black_box(indexer.index(true, &messages).unwrap()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let indexer = MessageIndexer::in_memory(IndexConfig::default()).unwrap();
    indexer.index(true, &generate_messages(2000)).unwrap();
    let search = indexer.read_index().unwrap();

    group.bench_function("term", |b| {
        b.iter(|| black_box(search.search_term_in_body(black_box("дорога")).unwrap()))
    });

    group.bench_function("parsed_multi_field", |b| {
        b.iter(|| {
            black_box(
                search
                    .search_in_multi_field(black_box("+тима (снег OR мороз) -ветер"), 10)
                    .unwrap(),
            )
        })
    });

    group.bench_function("fuzzy", |b| {
        b.iter(|| black_box(search.fuzzy_search_in_body(black_box("кореспондент")).unwrap()))
    });

    group.bench_function("combined_with_dates", |b| {
        b.iter(|| {
            black_box(
                search
                    .search_by_many_queries(
                        "тима",
                        &["Астана", "ALMATY_REGION"],
                        DateFilter::Between(1454284800, 1455494400),
                        10,
                    )
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_indexing, bench_search);
criterion_main!(benches);
