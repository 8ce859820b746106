//! TOML configuration.

use anyhow::Context;
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

/// Read when `--config` is not given and the file exists.
pub const DEFAULT_PATH: &str = "messenger.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the TCP connector probes.
    pub service: Option<String>,
    /// Default destination endpoint.
    pub server: Option<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: None,
            server: None,
            connect_timeout_ms: 2000,
            request_timeout_ms: 5000,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_PATH).exists() => Self::from_file(Path::new(DEFAULT_PATH)),
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Resolve a `host:port` service address to the first socket address.
pub fn resolve_service(service: &str) -> anyhow::Result<SocketAddr> {
    service
        .to_socket_addrs()
        .with_context(|| format!("resolving service {service}"))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("service {service} resolved to no addresses"))
}
