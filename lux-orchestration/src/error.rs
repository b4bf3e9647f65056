//! Erros de orquestração
//!
//! Somente erros de configuração na partida; falhas por ciclo viram eventos.

use thiserror::Error;
use lux_photonic::PhotonicError;

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrchestrationError {
    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Calibração rejeitada pelo modelo
    #[error("Calibration error: {0}")]
    Calibration(#[from] PhotonicError),
}
