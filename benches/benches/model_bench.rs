//! Benchmarks do modelo de luminosidade e do codec de payload

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lux_core::types::{LuminosityPercentage, RawSample};
use lux_network::{decode_percentage, encode_percentage};
use lux_photonic::{luminosity_percentage, CalibrationConstants, LuminosityModel};

fn bench_convert(c: &mut Criterion) {
    let model = LuminosityModel::default();
    let mut group = c.benchmark_group("convert");

    // clamp escuro, interpolação, clamp claro, extremo degenerado
    for raw in [5u32, 100, 1000, 4095] {
        group.bench_with_input(BenchmarkId::from_parameter(raw), &raw, |b, &raw| {
            b.iter(|| model.convert(black_box(RawSample(raw))))
        });
    }

    group.finish();
}

fn bench_full_scale_sweep(c: &mut Criterion) {
    let model = LuminosityModel::default();

    c.bench_function("convert_full_scale_sweep", |b| {
        b.iter(|| {
            (0..=4095u32)
                .map(|raw| model.percentage(RawSample(raw)).value() as u64)
                .sum::<u64>()
        })
    });
}

fn bench_free_function(c: &mut Criterion) {
    let calibration = CalibrationConstants::KY018;

    // inclui validação + ln das constantes a cada chamada
    c.bench_function("luminosity_percentage_free_fn", |b| {
        b.iter(|| luminosity_percentage(black_box(RawSample(100)), black_box(&calibration)))
    });
}

fn bench_codec(c: &mut Criterion) {
    let value = LuminosityPercentage::new(71).unwrap_or(LuminosityPercentage::DARK);

    c.bench_function("encode_percentage", |b| {
        b.iter(|| encode_percentage(black_box(value)))
    });

    c.bench_function("decode_percentage", |b| {
        b.iter(|| decode_percentage(black_box(b"71")))
    });
}

criterion_group!(
    benches,
    bench_convert,
    bench_full_scale_sweep,
    bench_free_function,
    bench_codec,
);
criterion_main!(benches);
