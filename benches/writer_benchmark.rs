//! Writer benchmark: Measure per-write overhead of the adapter.
//!
//! Target: lock + append well under 1µs for short tokens

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use view_writer::{ScrollBuffer, ViewWriter};

fn writer_str_token(c: &mut Criterion) {
    let view = Arc::new(Mutex::new(String::new()));
    let writer = ViewWriter::attach(&view);

    c.bench_function("writer_str_token", |b| {
        b.iter(|| {
            writer.write_str(black_box("token ")).unwrap();
            if view.lock().unwrap().len() > 1 << 20 {
                view.lock().unwrap().clear();
            }
        });
    });
}

fn writer_char(c: &mut Criterion) {
    let view = Arc::new(Mutex::new(ScrollBuffer::new(10_000)));
    let writer = ViewWriter::attach(&view);

    c.bench_function("writer_char", |b| {
        b.iter(|| writer.write_char(black_box('x')).unwrap());
    });
}

fn writer_formatted(c: &mut Criterion) {
    let view = Arc::new(Mutex::new(ScrollBuffer::new(10_000)));
    let writer = ViewWriter::attach(&view);

    c.bench_function("writer_formatted_line", |b| {
        let mut i = 0u64;
        b.iter(|| {
            writeln!(&writer, "line {}", black_box(i)).unwrap();
            i += 1;
        });
    });
}

fn writer_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("writer_bytes");

    for size in [64usize, 4096] {
        let chunk: Vec<u8> = "héllo wörld ".bytes().cycle().take(size).collect();
        let view = Arc::new(Mutex::new(ScrollBuffer::new(1_000)));
        let writer = ViewWriter::attach(&view);

        group.bench_with_input(BenchmarkId::from_parameter(size), &chunk, |b, chunk| {
            b.iter(|| writer.write_bytes(black_box(chunk)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    writer_str_token,
    writer_char,
    writer_formatted,
    writer_bytes,
);
criterion_main!(benches);
