//! Loop de telemetria
//!
//! Por ciclo: lê uma amostra, converte, envia. Toda falha é contida no ciclo
//! e vira evento; a vivacidade do loop (continuar amostrando na cadência) é
//! o invariante principal e nunca depende do sucesso de leitura ou envio.

use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use lux_core::events::LuxEvent;
use lux_core::traits::{Sensor, Transmitter};
use lux_core::types::{LuminosityPercentage, RawSample};
use lux_network::message::encode_percentage;
use lux_photonic::{Conversion, LuminosityModel};
use crate::error::{OrchestrationError, OrchestrationResult};
use crate::events::EventBus;
use crate::scheduler::{Scheduler, SchedulerConfig, SchedulerMode, TickOutcome};
use crate::shutdown::ShutdownSignal;

const COMPONENT: &str = "TelemetryLoop";

/// O que enviar quando a aquisição falha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionPolicy {
    /// Nenhum datagrama neste ciclo
    #[default]
    Skip,
    /// Reenvia a última porcentagem válida (pula se ainda não houver)
    LastKnown,
    /// Envia um valor sentinela fixo
    Sentinel(LuminosityPercentage),
}

/// Configuração do loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Intervalo entre ciclos
    pub period: Duration,
    /// Modo do scheduler
    pub mode: SchedulerMode,
    /// Política para falhas de aquisição
    pub policy: AcquisitionPolicy,
    /// Limite de ciclos (`None` = até o encerramento)
    pub max_cycles: Option<u64>,
}

impl TelemetryConfig {
    pub fn validate(&self) -> OrchestrationResult<()> {
        if self.period.is_zero() {
            return Err(OrchestrationError::InvalidConfiguration(
                "sampling period must be greater than zero".into(),
            ));
        }
        if self.max_cycles == Some(0) {
            return Err(OrchestrationError::InvalidConfiguration(
                "max_cycles must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            mode: SchedulerMode::FixedDelay,
            policy: AcquisitionPolicy::Skip,
            max_cycles: None,
        }
    }
}

/// Desfecho de um ciclo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Datagrama entregue ao canal local
    Transmitted { bytes: usize },
    /// Envio falhou localmente
    TransmissionFailed { error: String },
    /// Nada a enviar neste ciclo
    Skipped,
}

/// Relatório de um ciclo
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    /// Amostra lida (`None` se a aquisição falhou)
    pub raw: Option<RawSample>,
    pub conversion: Option<Conversion>,
    /// Payload enviado ou tentado
    pub payload: Option<Vec<u8>>,
    pub outcome: CycleOutcome,
}

/// Contadores acumulados
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    pub cycles: u64,
    pub transmitted: u64,
    pub acquisition_failures: u64,
    pub transmission_failures: u64,
    pub degenerate: u64,
    pub skipped: u64,
}

/// Loop de amostragem e envio
#[derive(Debug)]
pub struct TelemetryLoop<S, T> {
    sensor: S,
    model: LuminosityModel,
    transmitter: T,
    config: TelemetryConfig,
    scheduler: Scheduler,
    bus: EventBus,
    stats: LoopStats,
    last_good: Option<LuminosityPercentage>,
}

impl<S, T> TelemetryLoop<S, T>
where
    S: Sensor<RawData = RawSample>,
    T: Transmitter,
{
    /// Cria o loop validando a configuração
    pub fn new(
        sensor: S,
        model: LuminosityModel,
        transmitter: T,
        config: TelemetryConfig,
        bus: EventBus,
    ) -> OrchestrationResult<Self> {
        config.validate()?;

        let scheduler = Scheduler::new(SchedulerConfig {
            period: config.period,
            mode: config.mode,
        });

        Ok(Self {
            sensor,
            model,
            transmitter,
            config,
            scheduler,
            bus,
            stats: LoopStats::default(),
            last_good: None,
        })
    }

    /// Executa um ciclo completo (aquisição → conversão → envio)
    pub fn run_cycle(&mut self) -> CycleReport {
        self.stats.cycles += 1;
        let cycle = self.stats.cycles;

        let (raw, conversion, percentage) = match self.sensor.read() {
            Ok(raw) => {
                let conversion = self.sample(cycle, raw);
                (Some(raw), Some(conversion), Some(conversion.percentage))
            }
            Err(e) => {
                self.stats.acquisition_failures += 1;
                tracing::warn!(cycle, source = self.sensor.source(), error = %e, "acquisition failed");
                self.bus.emit(LuxEvent::AcquisitionFailed {
                    cycle,
                    source: self.sensor.source().to_string(),
                    message: e.to_string(),
                });
                (None, None, self.fallback())
            }
        };

        let Some(percentage) = percentage else {
            self.stats.skipped += 1;
            tracing::debug!(cycle, policy = ?self.config.policy, "cycle skipped");
            self.bus.emit(LuxEvent::CycleSkipped {
                cycle,
                reason: "no sample available".into(),
            });
            return CycleReport {
                cycle,
                raw,
                conversion,
                payload: None,
                outcome: CycleOutcome::Skipped,
            };
        };

        let payload = encode_percentage(percentage);
        let outcome = match self.transmitter.transmit(&payload) {
            Ok(bytes) => {
                self.stats.transmitted += 1;
                tracing::info!(
                    cycle,
                    luminosity = percentage.value(),
                    bytes,
                    destination = %self.transmitter.destination(),
                    "datagram sent"
                );
                self.bus.emit(LuxEvent::Transmitted { cycle, percentage, bytes });
                CycleOutcome::Transmitted { bytes }
            }
            Err(e) => {
                self.stats.transmission_failures += 1;
                tracing::warn!(cycle, destination = %self.transmitter.destination(), error = %e, "transmission failed");
                self.bus.emit(LuxEvent::TransmissionFailed {
                    cycle,
                    message: e.to_string(),
                });
                CycleOutcome::TransmissionFailed { error: e.to_string() }
            }
        };

        CycleReport {
            cycle,
            raw,
            conversion,
            payload: Some(payload),
            outcome,
        }
    }

    /// Converte uma amostra lida e publica os eventos correspondentes
    fn sample(&mut self, cycle: u64, raw: RawSample) -> Conversion {
        let conversion = self.model.convert(raw);

        tracing::debug!(
            cycle,
            raw = raw.value(),
            resistance = ?conversion.resistance_ohms,
            kind = ?conversion.kind,
            luminosity = conversion.percentage.value(),
            "sample converted"
        );

        self.bus.emit(LuxEvent::Sampled {
            cycle,
            raw,
            percentage: conversion.percentage,
            conversion: conversion.kind,
        });

        if let Some(edge) = conversion.edge {
            self.stats.degenerate += 1;
            tracing::warn!(cycle, raw = raw.value(), ?edge, substituted = conversion.percentage.value(), "degenerate sample");
            self.bus.emit(LuxEvent::ComputationDegenerate {
                cycle,
                raw,
                edge,
                substituted: conversion.percentage,
            });
        }

        self.last_good = Some(conversion.percentage);
        conversion
    }

    /// Valor a enviar quando a aquisição falha, conforme a política
    fn fallback(&self) -> Option<LuminosityPercentage> {
        match self.config.policy {
            AcquisitionPolicy::Skip => None,
            AcquisitionPolicy::LastKnown => self.last_good,
            AcquisitionPolicy::Sentinel(value) => Some(value),
        }
    }

    /// Executa ciclos na cadência configurada até o encerramento
    /// (ou até `max_cycles`)
    pub fn run(&mut self, shutdown: &ShutdownSignal) -> LoopStats {
        tracing::info!(
            source = self.sensor.source(),
            destination = %self.transmitter.destination(),
            period = ?self.config.period,
            policy = ?self.config.policy,
            sensor_version = self.sensor.version(),
            transmitter_version = self.transmitter.version(),
            "telemetry loop started"
        );
        self.bus.emit(LuxEvent::Ready {
            component: self.sensor.name().into(),
            version: self.sensor.version().into(),
        });
        self.bus.emit(LuxEvent::Ready {
            component: self.transmitter.name().into(),
            version: self.transmitter.version().into(),
        });
        self.bus.emit(LuxEvent::Ready {
            component: COMPONENT.into(),
            version: env!("CARGO_PKG_VERSION").into(),
        });

        loop {
            if self.config.max_cycles.is_some_and(|max| self.stats.cycles >= max) {
                tracing::info!(cycles = self.stats.cycles, "cycle limit reached");
                break;
            }

            match self.scheduler.wait_for_next_tick(shutdown) {
                TickOutcome::Tick(_) => {}
                TickOutcome::Cancelled => {
                    tracing::info!(cycles = self.stats.cycles, "shutdown requested");
                    break;
                }
            }

            let started = Instant::now();
            self.run_cycle();
            self.scheduler.record_execution_time(started.elapsed());
        }

        self.bus.emit(LuxEvent::Shutdown {
            component: COMPONENT.into(),
            cycles: self.stats.cycles,
        });

        self.stats.clone()
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }
}
