//! Benchmark – `CharBuffer` editing operations
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use seqbuf::{CharBuffer, NPOS};

/// A deterministic buffer of `len` printable bytes.
fn make_text(len: usize) -> CharBuffer {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_buffer_edits");
    for &len in &[64_usize, 4_096, 60_000] {
        let text = make_text(len);

        group.bench_with_input(BenchmarkId::new("insert_middle", len), &text, |b, text| {
            b.iter(|| {
                let mut s = text.clone();
                s.insert(s.len() / 2, black_box(b"inserted")).unwrap();
                black_box(s.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("replace_within", len), &text, |b, text| {
            b.iter(|| {
                let mut s = text.clone();
                let half = s.len() / 2;
                s.replace_within(0, half, half, NPOS).unwrap();
                black_box(s.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("erase_front", len), &text, |b, text| {
            b.iter(|| {
                let mut s = text.clone();
                s.erase(0, 1).unwrap();
                black_box(s.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("substr_tail", len), &text, |b, text| {
            b.iter(|| black_box(text.substr(text.len() / 4, NPOS).unwrap().len()));
        });
    }
    group.finish();
}

fn bench_push_back(c: &mut Criterion) {
    c.bench_function("char_buffer_push_back_60000", |b| {
        b.iter(|| {
            let mut s = CharBuffer::new();
            for i in 0..60_000_u32 {
                s.push_back(black_box(i as u8)).unwrap();
            }
            black_box(s.c_str().to_bytes().len())
        });
    });
}

criterion_group!(benches, bench_edits, bench_push_back);
criterion_main!(benches);
