//! # 🎯 Traits: Abstrações Fundamentais do LUX
//!
//! | Papel | Trait | Implementações |
//! |:------|:------|:---------------|
//! | Base | [`LuxComponent`] | todos |
//! | Aquisição | [`Sensor`] | `SysfsAdc`, `SimulatedAdc` (`lux-photonic`) |
//! | Transmissão | [`Transmitter`] | `UdpTransmitter` (`lux-network`) |
//!
//! Os traits aqui são **abstrações puras**. O loop de telemetria só conhece
//! estes contratos, o que permite trocar hardware e rede por dublês nos testes.

use std::fmt::Debug;

// ═══════════════════════════════════════════════════════════════════════════════
// TRAIT BASE: Todo componente LUX
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base para qualquer componente do agente.
pub trait LuxComponent: Send + Debug {
    /// Nome único do componente (para logs e eventos)
    fn name(&self) -> &str;

    /// Versão do componente
    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AQUISIÇÃO: Sensores
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de aquisição
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed reading: {0}")]
    Malformed(String),
    #[error("Reading {value} out of range 0..={max}")]
    OutOfRange { value: i64, max: u32 },
}

/// Fonte de amostras brutas.
///
/// # Exemplo
///
/// ```ignore
/// use lux_core::prelude::*;
///
/// #[derive(Debug)]
/// struct FixedAdc(u32);
///
/// impl LuxComponent for FixedAdc {
///     fn name(&self) -> &str { "fixed-adc" }
/// }
///
/// impl Sensor for FixedAdc {
///     type RawData = RawSample;
///
///     fn read(&mut self) -> Result<RawSample, SensorError> {
///         Ok(RawSample(self.0))
///     }
///
///     fn source(&self) -> &str { "memory" }
/// }
/// ```
pub trait Sensor: LuxComponent {
    /// Tipo dos dados brutos lidos
    type RawData;

    /// Lê uma amostra bruta
    fn read(&mut self) -> Result<Self::RawData, SensorError>;

    /// Identificador da fonte (caminho, canal, etc.)
    fn source(&self) -> &str;
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSMISSÃO: Canal de datagramas
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de transmissão
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransmitError {
    #[error("Destination unreachable: {0}")]
    Unreachable(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Payload too large: {len} > {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

/// Canal de entrega best-effort (sem confirmação, sem retransmissão).
pub trait Transmitter: LuxComponent {
    /// Envia um payload como um único datagrama, retornando bytes enviados
    fn transmit(&mut self, payload: &[u8]) -> Result<usize, TransmitError>;

    /// Destino em forma legível (para logs)
    fn destination(&self) -> String;
}
