//! Push/parse throughput benchmarks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use jsonpush::{NullSink, Parser, ParserConfig, StaticStack};

fn parse_all(source: &[u8]) {
    let mut parser = Parser::new(StaticStack::<32>::new(), NullSink, ParserConfig::new());
    parser.push(black_box(source)).unwrap();
    parser.finalize().unwrap();
}

fn flat_array_of_ints(n: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&i.to_string());
    }
    s.push(']');
    s.into_bytes()
}

fn flat_array_of_floats(n: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("{}.{}e2", i, i % 10));
    }
    s.push(']');
    s.into_bytes()
}

fn array_of_short_strings(n: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push_str("\"the quick brown fox\"");
    }
    s.push(']');
    s.into_bytes()
}

fn nested_objects(depth: usize) -> Vec<u8> {
    let mut s = String::new();
    for _ in 0..depth {
        s.push_str(r#"{"a":"#);
    }
    s.push_str("null");
    for _ in 0..depth {
        s.push('}');
    }
    s.into_bytes()
}

fn bench_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_numbers");

    let ints = flat_array_of_ints(10_000);
    group.throughput(Throughput::Bytes(ints.len() as u64));
    group.bench_function("int_array", |b| b.iter(|| parse_all(&ints)));

    let floats = flat_array_of_floats(10_000);
    group.throughput(Throughput::Bytes(floats.len() as u64));
    group.bench_function("float_array", |b| b.iter(|| parse_all(&floats)));

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_strings");

    let strings = array_of_short_strings(10_000);
    group.throughput(Throughput::Bytes(strings.len() as u64));
    group.bench_function("short_string_array", |b| b.iter(|| parse_all(&strings)));

    group.finish();
}

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_nesting");

    let nested = nested_objects(64);
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("deeply_nested_objects", |b| b.iter(|| parse_all(&nested)));

    group.finish();
}

fn bench_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_chunking");

    let doc = flat_array_of_ints(10_000);
    group.throughput(Throughput::Bytes(doc.len() as u64));
    group.bench_function("one_byte_at_a_time", |b| {
        b.iter(|| {
            let mut parser = Parser::new(StaticStack::<32>::new(), NullSink, ParserConfig::new());
            for byte in &doc {
                parser.push(black_box(std::slice::from_ref(byte))).unwrap();
            }
            parser.finalize().unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_numbers, bench_strings, bench_nesting, bench_chunking);
criterion_main!(benches);
