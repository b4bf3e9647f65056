//! Coletor - lado receptor dos datagramas
//!
//! Recebe o texto decimal, valida e enriquece com metadados (id do sensor,
//! unidade, origem, instante) numa [`Reading`] serializável em JSON.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use serde::{Deserialize, Serialize};
use lux_core::types::LuminosityPercentage;
use crate::message::decode_percentage;
use crate::{NetworkError, NetworkResult};

/// Identificador do módulo sensor anexado às leituras
pub const DEFAULT_SENSOR_ID: &str = "LDR_KY-018";

const RECV_BUFFER_SIZE: usize = 1024;

/// Leitura enriquecida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: String,
    pub value: LuminosityPercentage,
    pub unit: String,
    pub peer: SocketAddr,
    /// Segundos desde a epoch Unix
    pub received_at: u64,
}

impl Reading {
    pub fn new(id: impl Into<String>, value: LuminosityPercentage, peer: SocketAddr) -> Self {
        Self {
            id: id.into(),
            value,
            unit: "%".into(),
            peer,
            received_at: unix_now(),
        }
    }

    /// Forma JSON compacta
    pub fn to_json(&self) -> NetworkResult<String> {
        serde_json::to_string(self).map_err(|e| NetworkError::Serialization(e.to_string()))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Servidor UDP que transforma datagramas em leituras
#[derive(Debug)]
pub struct Collector {
    socket: UdpSocket,
    sensor_id: String,
    buffer: [u8; RECV_BUFFER_SIZE],
    received: u64,
    rejected: u64,
}

impl Collector {
    /// Liga o coletor; `recv_reading` retorna `None` a cada `poll` sem dados
    pub fn bind(addr: SocketAddr, poll: Duration) -> NetworkResult<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(poll))?;

        Ok(Self {
            socket,
            sensor_id: DEFAULT_SENSOR_ID.into(),
            buffer: [0u8; RECV_BUFFER_SIZE],
            received: 0,
            rejected: 0,
        })
    }

    /// Troca o id anexado às leituras
    pub fn with_sensor_id(mut self, id: impl Into<String>) -> Self {
        self.sensor_id = id.into();
        self
    }

    /// Endereço local do socket
    pub fn local_addr(&self) -> NetworkResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Aguarda o próximo datagrama
    ///
    /// `Ok(None)` no timeout; `Err(Malformed)` para payload inválido (o
    /// coletor continua utilizável).
    pub fn recv_reading(&mut self) -> NetworkResult<Option<Reading>> {
        let (len, peer) = match self.socket.recv_from(&mut self.buffer) {
            Ok(received) => received,
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => return Ok(None),
            Err(e) => return Err(NetworkError::Transport(e.to_string())),
        };

        match decode_percentage(&self.buffer[..len]) {
            Ok(value) => {
                self.received += 1;
                tracing::debug!(%peer, value = value.value(), "reading received");
                Ok(Some(Reading::new(self.sensor_id.clone(), value, peer)))
            }
            Err(e) => {
                self.rejected += 1;
                tracing::warn!(%peer, error = %e, "rejected datagram");
                Err(e)
            }
        }
    }

    /// Leituras válidas recebidas
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Datagramas rejeitados
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
