//! Transporte UDP (best-effort)
//!
//! Um único socket por processo, sem conexão, sem retransmissão. O timeout
//! de escrita limita quanto tempo um envio pode bloquear o ciclo.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use lux_core::traits::{LuxComponent, Transmitter, TransmitError};
use crate::{Endpoint, NetworkError, NetworkResult};

/// Maior payload aceito (MTU Ethernet)
pub const MAX_DATAGRAM_SIZE: usize = 1500;

/// Tempo máximo que um envio pode bloquear
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(500);

/// Transmissor UDP para um destino fixo
#[derive(Debug)]
pub struct UdpTransmitter {
    socket: UdpSocket,
    destination: SocketAddr,
    write_timeout: Duration,
}

impl UdpTransmitter {
    /// Resolve o endpoint e cria o socket
    pub fn connect(endpoint: &Endpoint) -> NetworkResult<Self> {
        Self::new(endpoint.resolve()?, DEFAULT_WRITE_TIMEOUT)
    }

    /// Cria socket na família do destino, ligado a uma porta efêmera
    pub fn new(destination: SocketAddr, write_timeout: Duration) -> NetworkResult<Self> {
        let domain = Domain::for_address(destination);
        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

        let local: SocketAddr = if destination.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        socket.bind(&SockAddr::from(local))?;
        socket.set_write_timeout(Some(write_timeout))?;

        Ok(Self {
            socket: socket.into(),
            destination,
            write_timeout,
        })
    }

    /// Endereço local do socket
    pub fn local_addr(&self) -> NetworkResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Destino resolvido
    pub fn destination_addr(&self) -> SocketAddr {
        self.destination
    }

    /// Envia um datagrama
    pub fn send(&self, payload: &[u8]) -> NetworkResult<usize> {
        if payload.len() > MAX_DATAGRAM_SIZE {
            return Err(NetworkError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_DATAGRAM_SIZE,
            });
        }

        self.socket
            .send_to(payload, self.destination)
            .map_err(|e| self.classify(e))
    }

    fn classify(&self, e: io::Error) -> NetworkError {
        match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                NetworkError::Timeout(self.write_timeout.as_millis() as u64)
            }
            io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::AddrNotAvailable => {
                NetworkError::Unreachable(format!("{}: {}", self.destination, e))
            }
            _ => NetworkError::Transport(e.to_string()),
        }
    }
}

impl LuxComponent for UdpTransmitter {
    fn name(&self) -> &str {
        "UdpTransmitter"
    }
}

impl Transmitter for UdpTransmitter {
    fn transmit(&mut self, payload: &[u8]) -> Result<usize, TransmitError> {
        Ok(self.send(payload)?)
    }

    fn destination(&self) -> String {
        self.destination.to_string()
    }
}
