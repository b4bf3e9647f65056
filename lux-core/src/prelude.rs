//! # Prelude: Re-exportações Convenientes
//!
//! ```
//! use lux_core::prelude::*;
//! ```

// Tipos
pub use crate::types::{
    RawSample,
    LuminosityPercentage,
};

// Traits fundamentais
pub use crate::traits::{
    LuxComponent,
    Sensor,
    SensorError,
    Transmitter,
    TransmitError,
};

// Eventos
pub use crate::events::{
    LuxEvent,
    EventKind,
    ConversionKind,
    DegenerateEdge,
};
