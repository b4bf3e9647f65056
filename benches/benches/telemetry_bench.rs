//! # Telemetry Benchmarks
//!
//! Custo de um ciclo completo (sem rede) e vazão do event bus.
//!
//! Run: `cargo bench --bench telemetry_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lux_core::prelude::*;
use lux_orchestration::{EventBus, EventFilter, TelemetryConfig, TelemetryLoop};
use lux_photonic::{LuminosityModel, SimulatedAdc};

/// Transmissor que só conta bytes
#[derive(Debug, Default)]
struct NullTransmitter {
    bytes: usize,
}

impl LuxComponent for NullTransmitter {
    fn name(&self) -> &str {
        "NullTransmitter"
    }
}

impl Transmitter for NullTransmitter {
    fn transmit(&mut self, payload: &[u8]) -> Result<usize, TransmitError> {
        self.bytes += payload.len();
        Ok(payload.len())
    }

    fn destination(&self) -> String {
        "null".into()
    }
}

fn bench_run_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("telemetry");

    let telemetry = TelemetryLoop::new(
        SimulatedAdc::default(),
        LuminosityModel::default(),
        NullTransmitter::default(),
        TelemetryConfig::default(),
        EventBus::new(),
    );

    if let Ok(mut telemetry) = telemetry {
        group.bench_function("run_cycle_no_subscribers", |b| {
            b.iter(|| black_box(telemetry.run_cycle()))
        });
    }

    let bus = EventBus::with_capacity(64);
    let failures = bus.subscribe_filtered(EventFilter::Failures);
    let telemetry = TelemetryLoop::new(
        SimulatedAdc::default(),
        LuminosityModel::default(),
        NullTransmitter::default(),
        TelemetryConfig::default(),
        bus,
    );

    if let Ok(mut telemetry) = telemetry {
        group.bench_function("run_cycle_filtered_subscriber", |b| {
            b.iter(|| {
                let report = telemetry.run_cycle();
                black_box(failures.drain());
                report
            })
        });
    }

    group.finish();
}

fn bench_event_bus(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_bus");

    let bus = EventBus::new();
    let sub = bus.subscribe();

    group.bench_function("emit_and_drain", |b| {
        b.iter(|| {
            bus.emit(LuxEvent::CycleSkipped {
                cycle: 1,
                reason: "bench".into(),
            });
            black_box(sub.drain())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_run_cycle, bench_event_bus);
criterion_main!(benches);
