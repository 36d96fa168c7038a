//! Command-line interface.
//!
//! Every flag can also be given through a `TINYSERVE_*` environment variable.
//!
//! ```bash
//! tinyserve --port 4221 --directory /tmp/files
//! TINYSERVE_HOST=127.0.0.1 tinyserve
//! ```

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::server::{Protocol, ServerConfig};

/// A minimal HTTP/1.1 server with echo and file routes.
#[derive(Debug, Clone, Parser)]
#[command(name = "tinyserve", version, about)]
pub struct Cli {
    /// Network to listen on: tcp, tcp4 or tcp6
    #[arg(long, default_value = "tcp", env = "TINYSERVE_PROTOCOL")]
    pub protocol: Protocol,

    /// Host or IP address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "TINYSERVE_HOST")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value_t = 4221, env = "TINYSERVE_PORT")]
    pub port: u16,

    /// Directory served and written by the /files/ routes
    #[arg(short, long, env = "TINYSERVE_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Size in bytes of the single read each request must fit in
    #[arg(
        long,
        default_value_t = 8192,
        env = "TINYSERVE_READ_BUFFER_SIZE",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub read_buffer_size: usize,

    /// Maximum number of connections served at once (unbounded if unset)
    #[arg(
        long,
        env = "TINYSERVE_MAX_CONNECTIONS",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_connections: Option<usize>,
}

impl Cli {
    /// Convert the parsed flags into a server configuration.
    ///
    /// An empty `--directory` disables the file routes, like leaving it out.
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            protocol: self.protocol,
            host: self.host,
            port: self.port,
            directory: self.directory.filter(|dir| !dir.as_os_str().is_empty()),
            read_buffer_size: self.read_buffer_size,
            max_connections: self.max_connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Cli::try_parse_from(["tinyserve"]).unwrap().into_config();
        assert_eq!(config.protocol, Protocol::Tcp);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4221);
        assert!(config.directory.is_none());
        assert_eq!(config.read_buffer_size, 8192);
        assert!(config.max_connections.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "tinyserve",
            "--protocol",
            "tcp4",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--directory",
            "/tmp/files",
            "--max-connections",
            "16",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.protocol, Protocol::Tcp4);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.directory, Some(PathBuf::from("/tmp/files")));
        assert_eq!(config.max_connections, Some(16));
    }

    #[test]
    fn test_empty_directory_disables_file_routes() {
        let config = Cli::try_parse_from(["tinyserve", "--directory", ""]).unwrap().into_config();
        assert!(config.directory.is_none());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        assert!(Cli::try_parse_from(["tinyserve", "--max-connections", "0"]).is_err());
        assert!(Cli::try_parse_from(["tinyserve", "--read-buffer-size", "0"]).is_err());

        let config = Cli::try_parse_from(["tinyserve", "--max-connections", "1", "--read-buffer-size", "1"])
            .unwrap()
            .into_config();
        assert_eq!(config.max_connections, Some(1));
        assert_eq!(config.read_buffer_size, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_protocol_is_rejected() {
        assert!(Cli::try_parse_from(["tinyserve", "--protocol", "udp"]).is_err());
    }
}
