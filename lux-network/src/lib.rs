//! # L8: Rede
//!
//! Canal de datagramas sem conexão: o agente envia a porcentagem mais recente
//! como texto decimal ASCII, sem delimitador, sem prefixo de tamanho e sem
//! confirmação. Perdas são aceitas.
//!
//! ## Responsabilidades
//! - [`Endpoint`]: destino fixo (host + porta), resolvido na partida
//! - [`message`]: codificação/decodificação do payload decimal
//! - [`UdpTransmitter`]: socket construído com `socket2`, timeout de escrita
//! - [`Collector`]: lado receptor (enriquecimento, histórico, log CSV)
//!
//! ## Uso
//!
//! ```rust,no_run
//! use lux_network::{Endpoint, UdpTransmitter};
//! use lux_core::prelude::*;
//!
//! let endpoint = Endpoint::new("192.168.42.10", 8080);
//! let mut tx = UdpTransmitter::connect(&endpoint).unwrap();
//! let payload = lux_network::message::encode_percentage(LuminosityPercentage::BRIGHT);
//! tx.transmit(&payload).unwrap();
//! ```

use lux_core::traits::TransmitError;

pub mod endpoint;
pub mod message;
pub mod transport;
pub mod collector;
pub mod history;

pub use endpoint::Endpoint;
pub use message::{encode_percentage, decode_percentage};
pub use transport::{UdpTransmitter, MAX_DATAGRAM_SIZE, DEFAULT_WRITE_TIMEOUT};
pub use collector::{Collector, Reading, DEFAULT_SENSOR_ID};
pub use history::{History, CsvLog, DEFAULT_HISTORY};

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Erros específicos de lux-network
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Destination unreachable: {0}")]
    Unreachable(String),
    #[error("Cannot resolve endpoint {0}")]
    Resolve(String),
    #[error("Malformed datagram: {0}")]
    Malformed(String),
    #[error("Payload too large: {len} > {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl From<NetworkError> for TransmitError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::Unreachable(s) => TransmitError::Unreachable(s),
            NetworkError::Resolve(s) => TransmitError::Unreachable(s),
            NetworkError::PayloadTooLarge { len, max } => TransmitError::PayloadTooLarge { len, max },
            NetworkError::Timeout(ms) => TransmitError::Timeout(ms),
            NetworkError::Io(e) => TransmitError::Io(e.to_string()),
            other => TransmitError::Io(other.to_string()),
        }
    }
}
