//! Payload dos datagramas
//!
//! Formato wire: a porcentagem em decimal ASCII (`"0"`..`"100"`), nada mais.

use lux_core::types::LuminosityPercentage;
use crate::{NetworkError, NetworkResult};

/// Codifica a porcentagem como texto decimal
pub fn encode_percentage(pct: LuminosityPercentage) -> Vec<u8> {
    pct.to_string().into_bytes()
}

/// Decodifica um payload recebido
///
/// Tolera espaços e quebras de linha ao redor; rejeita o resto.
pub fn decode_percentage(payload: &[u8]) -> NetworkResult<LuminosityPercentage> {
    let text = std::str::from_utf8(payload)
        .map_err(|_| NetworkError::Malformed(format!("not UTF-8: {payload:?}")))?
        .trim();

    let value: u8 = text
        .parse()
        .map_err(|_| NetworkError::Malformed(format!("not a percentage: {text:?}")))?;

    LuminosityPercentage::new(value)
        .ok_or_else(|| NetworkError::Malformed(format!("percentage out of range: {value}")))
}
