//! Destino dos datagramas

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{NetworkError, NetworkResult};

/// Host de referência (máquina do coletor)
pub const DEFAULT_HOST: &str = "192.168.42.10";
/// Porta UDP do coletor
pub const DEFAULT_PORT: u16 = 8080;

/// Endereço + porta do coletor, fixo durante a vida do processo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve para o primeiro endereço de socket
    ///
    /// Falha aqui é erro de configuração fatal na partida.
    pub fn resolve(&self) -> NetworkResult<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| NetworkError::Resolve(format!("{self}: {e}")))?
            .next()
            .ok_or_else(|| NetworkError::Resolve(format!("{self}: no address")))
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = NetworkError;

    /// Aceita `host:porta` e `[ipv6]:porta`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| NetworkError::Resolve(format!("{s}: expected host:port")))?;

        let port: u16 = port
            .parse()
            .map_err(|_| NetworkError::Resolve(format!("{s}: invalid port")))?;

        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(NetworkError::Resolve(format!("{s}: empty host")));
        }

        Ok(Self::new(host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_default() {
        let ep = Endpoint::default();
        assert_eq!(ep.to_string(), "192.168.42.10:8080");
    }

    #[test]
    fn endpoint_resolve_ip() {
        let addr = Endpoint::new("127.0.0.1", 9000).resolve().unwrap();
        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn endpoint_resolve_garbage_fails() {
        let result = Endpoint::new("not an address!", 9000).resolve();
        assert!(matches!(result, Err(NetworkError::Resolve(_))));
    }

    #[test]
    fn endpoint_from_str() {
        let ep: Endpoint = "10.0.0.2:8080".parse().unwrap();
        assert_eq!(ep, Endpoint::new("10.0.0.2", 8080));

        let v6: Endpoint = "[::1]:7000".parse().unwrap();
        assert_eq!(v6.host, "::1");
        assert_eq!(v6.to_string(), "[::1]:7000");

        assert!("10.0.0.2".parse::<Endpoint>().is_err());
        assert!("10.0.0.2:http".parse::<Endpoint>().is_err());
        assert!(":80".parse::<Endpoint>().is_err());
    }
}
