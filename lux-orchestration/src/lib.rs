//! # 🎭 lux-orchestration: Ciclo de Telemetria
//!
//! Conduz, em cadência fixa, a leitura de uma amostra, a conversão pelo
//! modelo de luminosidade e o envio best-effort do resultado.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TelemetryLoop                            │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  Scheduler (tick | shutdown)                          │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  Ciclo: Sensor → LuminosityModel → Transmitter        │  │
//! │  │  falhas contidas no ciclo, nunca fatais               │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  EventBus (LuxEvent tipado, não bloqueante)           │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```ignore
//! use lux_orchestration::*;
//!
//! let (handle, signal) = shutdown_channel();
//! let mut telemetry = TelemetryLoop::new(adc, model, udp, TelemetryConfig::default(), EventBus::new())?;
//! let stats = telemetry.run(&signal);
//! ```

pub mod error;
pub mod shutdown;
pub mod scheduler;
pub mod events;
pub mod telemetry;

pub use error::{OrchestrationError, OrchestrationResult};
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownSignal};
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerMode, SchedulerStats, TickInfo, TickOutcome};
pub use events::{EventBus, EventFilter, Subscription};
pub use telemetry::{
    AcquisitionPolicy, CycleOutcome, CycleReport, LoopStats, TelemetryConfig, TelemetryLoop,
};

// Re-exporta traits do core
pub use lux_core::prelude::*;
