//! # 📷 lux-photonic: Percepção Fotônica
//!
//! Converte o código bruto do ADC em porcentagem de luminosidade usando o
//! modelo físico de um LDR em divisor de tensão.
//!
//! ## Modelo
//!
//! ```text
//! R_ldr = R_fixo · (ADC_max − raw) / raw
//!
//!            ln(R_escuro) − ln(R_ldr)
//! pct = 100 · ────────────────────────────      (limitado a 0..=100)
//!            ln(R_escuro) − ln(R_claro)
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use lux_photonic::{CalibrationConstants, LuminosityModel};
//! use lux_core::RawSample;
//!
//! let model = LuminosityModel::new(CalibrationConstants::KY018).unwrap();
//! let conversion = model.convert(RawSample(50));
//! assert_eq!(conversion.percentage.value(), 51);
//! ```

pub mod error;
pub mod calibration;
pub mod model;
pub mod adc;

pub use error::{PhotonicError, PhotonicResult};
pub use calibration::CalibrationConstants;
pub use model::{Conversion, LuminosityModel, luminosity_percentage};
pub use adc::{SysfsAdc, SimulatedAdc, DEFAULT_ADC_PATH};

// Re-export core types
pub use lux_core::prelude::*;
