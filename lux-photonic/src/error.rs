//! Erros específicos do módulo fotônico

use std::path::PathBuf;
use thiserror::Error;
use lux_core::traits::SensorError;

pub type PhotonicResult<T> = Result<T, PhotonicError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhotonicError {
    #[error("ADC source {path} unavailable: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("ADC source {path} returned malformed content: {content:?}")]
    Malformed { path: PathBuf, content: String },

    #[error("ADC reading {value} out of range 0..={max}")]
    OutOfRange { value: i64, max: u32 },

    #[error("Invalid calibration: {0}")]
    InvalidConfig(String),
}

// Conversão para SensorError do core
impl From<PhotonicError> for SensorError {
    fn from(err: PhotonicError) -> Self {
        match err {
            PhotonicError::SourceUnavailable { path, reason } => {
                SensorError::Unavailable(format!("{}: {}", path.display(), reason))
            }
            PhotonicError::Malformed { path, content } => {
                SensorError::Malformed(format!("{}: {:?}", path.display(), content))
            }
            PhotonicError::OutOfRange { value, max } => SensorError::OutOfRange { value, max },
            PhotonicError::InvalidConfig(msg) => SensorError::Malformed(msg),
        }
    }
}
