use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use std::hint::black_box;
use suuid::{Alphabet, AlphabetRegistry, Codec, Encoder, Radix, Uint128, sort};

const BATCH: usize = 1024;

fn get_codec(name: &str) -> Codec {
    AlphabetRegistry::load_default().unwrap().codec(name).unwrap()
}

fn random_values() -> Vec<Uint128> {
    let mut rng = rand::rng();
    (0..BATCH).map(|_| Uint128::from(rng.random::<u128>())).collect()
}

fn bench_encode(c: &mut Criterion) {
    let values = random_values();
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(BATCH as u64));

    for name in ["base57", "base58", "hex", "hiragana"] {
        let codec = get_codec(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &values, |b, values| {
            b.iter(|| {
                for &value in values {
                    black_box(codec.encode(black_box(value)));
                }
            });
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let values = random_values();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(BATCH as u64));

    for name in ["base57", "base58", "hex", "hiragana"] {
        let codec = get_codec(name);
        let encoded: Vec<String> = values.iter().map(|&v| codec.encode(v)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(name), &encoded, |b, encoded| {
            b.iter(|| {
                for text in encoded {
                    black_box(codec.decode(black_box(text)).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_fast_path(c: &mut Criterion) {
    let values = random_values();
    let fast = Codec::default();
    let generic = Codec::Radix(Radix::new(Alphabet::default()));
    let mut group = c.benchmark_group("base57_strategy");
    group.throughput(Throughput::Elements(BATCH as u64));

    for (label, codec) in [("fast", &fast), ("generic", &generic)] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &values, |b, values| {
            b.iter(|| {
                for &value in values {
                    black_box(codec.encode(black_box(value)));
                }
            });
        });
    }
    group.finish();
}

fn bench_alphabet(c: &mut Criterion) {
    let registry = AlphabetRegistry::load_default().unwrap();
    let mut group = c.benchmark_group("alphabet_new");

    for name in ["base57", "base62", "hiragana"] {
        let symbols = registry.get(name).unwrap().effective_chars().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &symbols, |b, symbols| {
            b.iter(|| Alphabet::new(black_box(symbols)).unwrap());
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let mut rng = rand::rng();
    let size = 16384u32;

    let inputs: [(&str, Vec<u32>); 5] = [
        ("random", (0..size).map(|_| rng.random()).collect()),
        ("sorted", (0..size).collect()),
        ("reversed", (0..size).rev().collect()),
        ("few_distinct", (0..size).map(|_| rng.random_range(0..8)).collect()),
        ("sawtooth", (0..size).map(|i| i % 64).collect()),
    ];

    group.throughput(Throughput::Elements(u64::from(size)));
    for (label, data) in &inputs {
        group.bench_with_input(BenchmarkId::from_parameter(label), data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                sort::sort(black_box(&mut v));
                v
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_fast_path,
    bench_alphabet,
    bench_sort
);
criterion_main!(benches);
