use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pos_core::corpus::sample_corpus;
use pos_core::{train, PosTagger};

fn sentences() -> Vec<Vec<String>> {
    sample_corpus()
        .iter()
        .map(|s| s.words().map(str::to_string).collect())
        .collect()
}

fn train_benchmark(c: &mut Criterion) {
    let corpus = sample_corpus();
    c.bench_function("train_sample", |b| b.iter(|| train(black_box(&corpus))));
}

fn decode_benchmark(c: &mut Criterion) {
    let tagger = PosTagger::from_corpus(&sample_corpus());
    let dataset = sentences();
    let decoder = tagger.decoder();

    c.bench_function("viterbi_sequential", |b| {
        b.iter(|| {
            for words in &dataset {
                black_box(decoder.tag(black_box(words)));
            }
        })
    });
    c.bench_function("tag_sentences_parallel", |b| {
        b.iter(|| tagger.tag_sentences(black_box(&dataset)))
    });
}

criterion_group!(benchmarks, train_benchmark, decode_benchmark);
criterion_main!(benchmarks);
