//! Frame construction and response analysis benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voltage_s7::frame::{build_read_frame, build_write_frame, WriteData};
use voltage_s7::response::analyze_read;
use voltage_s7::S7Address;

fn benchmark_parse_address(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_address");
    for text in ["M100.0", "DB15.DBD120", "VW200", "AIW2"] {
        group.bench_function(text, |b| {
            b.iter(|| S7Address::parse(black_box(text), black_box(4)).unwrap());
        });
    }
    group.finish();
}

fn benchmark_build_frames(c: &mut Criterion) {
    let word = S7Address::parse("DB1.DBW4", 2).unwrap();
    let bit = S7Address::parse("M100.0", 1).unwrap();
    let payload = [0x12u8, 0x34];

    let mut group = c.benchmark_group("build_frame");
    group.bench_function("read_word", |b| {
        b.iter(|| build_read_frame(black_box(&word), black_box(false)));
    });
    group.bench_function("read_bit", |b| {
        b.iter(|| build_read_frame(black_box(&bit), black_box(true)));
    });
    group.bench_function("write_word", |b| {
        b.iter(|| build_write_frame(black_box(&word), WriteData::Bytes(black_box(&payload))));
    });
    group.bench_function("write_bit", |b| {
        b.iter(|| build_write_frame(black_box(&bit), WriteData::Bit(black_box(true))));
    });
    group.finish();
}

fn benchmark_analyze_read(c: &mut Criterion) {
    // 29-byte reply carrying one 4-byte item record.
    let mut reply = vec![
        0x03, 0x00, 0x00, 0x1D, 0x02, 0xF0, 0x80, 0x32, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00,
        0x02, 0x00, 0x08, 0x00, 0x00, 0x04, 0x01, 0xFF, 0x04, 0x00, 0x20,
    ];
    reply.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    c.bench_function("analyze_read_dword", |b| {
        b.iter(|| analyze_read(black_box(&reply), black_box(false)).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_parse_address,
    benchmark_build_frames,
    benchmark_analyze_read
);
criterion_main!(benches);
