//! Server configuration.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::server::error::Error;

/// The network the listener binds on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    /// IPv4 or IPv6.
    #[default]
    Tcp,
    /// IPv4 only.
    Tcp4,
    /// IPv6 only.
    Tcp6,
}

impl Protocol {
    /// Whether `addr` belongs to the address family this protocol listens on.
    pub fn accepts(&self, addr: &SocketAddr) -> bool {
        match self {
            Protocol::Tcp => true,
            Protocol::Tcp4 => addr.is_ipv4(),
            Protocol::Tcp6 => addr.is_ipv6(),
        }
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "tcp4" => Ok(Protocol::Tcp4),
            "tcp6" => Ok(Protocol::Tcp6),
            other => Err(Error::Config(format!("unsupported protocol: {other}"))),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Tcp4 => write!(f, "tcp4"),
            Protocol::Tcp6 => write!(f, "tcp6"),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The network to listen on.
    pub protocol: Protocol,
    /// The host name or IP address to bind to.
    pub host: String,
    /// The port to bind to.
    pub port: u16,
    /// Base directory for the `/files/` routes; `None` disables them.
    pub directory: Option<PathBuf>,
    /// Size of the single read a request must fit in.
    pub read_buffer_size: usize,
    /// Upper bound on concurrently served connections; `None` is unbounded.
    pub max_connections: Option<usize>,
}

impl ServerConfig {
    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.read_buffer_size == 0 {
            return Err(Error::Config("read buffer size must be >= 1".to_string()));
        }
        if self.max_connections == Some(0) {
            return Err(Error::Config("max connections must be >= 1".to_string()));
        }
        Ok(())
    }

    /// The `host:port` string the listener resolves.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Resolve the bind address, keeping only addresses the protocol accepts.
    pub async fn resolve(&self) -> Result<SocketAddr, Error> {
        let bind_address = self.bind_address();
        let mut candidates = tokio::net::lookup_host(bind_address.as_str())
            .await
            .map_err(|e| Error::Config(format!("cannot resolve {bind_address}: {e}")))?;

        candidates.find(|addr| self.protocol.accepts(addr)).ok_or_else(|| {
            Error::Config(format!(
                "no {protocol} address found for {bind_address}",
                protocol = self.protocol
            ))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::Tcp,
            host: "0.0.0.0".to_string(),
            port: 4221,
            directory: None,
            read_buffer_size: 8192,
            max_connections: None,
        }
    }
}
