//! Listener settings for the blogging API

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Where quill listens and which browser origins it admits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    /// Bind address, `0.0.0.0` unless overridden by `QUILL_HOST`
    pub host: String,

    /// Bind port, 8000 unless overridden by `QUILL_PORT`
    pub port: u16,

    /// Origins allowed by CORS. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// `host:port` as written in the config
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed bind address; fails for hostnames and malformed IPs
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.socket_addr().parse()
    }
}
