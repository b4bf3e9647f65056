//! # 💡 LUX-Core
//!
//! Vocabulário compartilhado do agente de telemetria de luminosidade.
//!
//! > *"Trait no core, implementação no módulo."*
//!
//! ## Fluxo de dados
//!
//! ```text
//! ┌──────────────┐   RawSample   ┌──────────────────┐   LuminosityPercentage   ┌──────────────┐
//! │    Sensor    │ ────────────▶ │ LuminosityModel  │ ───────────────────────▶ │ Transmitter  │
//! │ (sysfs ADC)  │               │  (lux-photonic)  │                          │ (UDP, L8)    │
//! └──────────────┘               └──────────────────┘                          └──────────────┘
//!                                         │
//!                                         ▼
//!                                   LuxEvent (bus)
//! ```
//!
//! ## Módulos
//!
//! - [`types`]: `RawSample` e `LuminosityPercentage`
//! - [`traits`]: `LuxComponent`, `Sensor`, `Transmitter` e seus erros
//! - [`events`]: `LuxEvent` - eventos tipados emitidos por ciclo

pub mod types;
pub mod traits;
pub mod events;
pub mod prelude;

pub use types::{RawSample, LuminosityPercentage};
pub use traits::{LuxComponent, Sensor, SensorError, Transmitter, TransmitError};
pub use events::{LuxEvent, EventKind, ConversionKind, DegenerateEdge};
