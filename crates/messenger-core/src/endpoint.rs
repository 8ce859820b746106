//! Destination endpoints.
//!
//! Endpoint format: `host:port`
//!
//! - `host` is a dotted-decimal IPv4 address or a colon-separated IPv6 address
//! - `port` is decimal digits only, no greater than [`MAX_PORT`]
//!
//! The string is split on its last `:`, so IPv6 hosts keep their inner colons.

use crate::message::kind_of;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Highest port an endpoint may name.
///
/// This is deliberately 65525, not 65535.
pub const MAX_PORT: u16 = 65525;

/// The address half of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    V4(Ipv4Addr),
    V6(Ipv6Addr),
}

impl Host {
    /// Check if this is an IPv6 host.
    pub fn is_ipv6(&self) -> bool {
        matches!(self, Self::V6(_))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(addr) => write!(f, "{addr}"),
            Self::V6(addr) => write!(f, "{addr}"),
        }
    }
}

impl FromStr for Host {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(addr) = parse_ipv4(s) {
            return Ok(Self::V4(addr));
        }
        // Covers full, `::`-compressed and IPv4-tailed forms in either case.
        s.parse::<Ipv6Addr>()
            .map(Self::V6)
            .map_err(|_| EndpointError::InvalidHost(s.to_string()))
    }
}

/// Four dot-separated octets of one to three digits each, 0-255.
///
/// Unlike `Ipv4Addr::from_str`, leading zeros are accepted.
fn parse_ipv4(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for octet in &mut octets {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

fn parse_port(s: &str) -> Result<u16, EndpointError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EndpointError::InvalidPort(s.to_string()));
    }
    let value: u64 = s
        .parse()
        .map_err(|_| EndpointError::InvalidPort(s.to_string()))?;
    u16::try_from(value)
        .ok()
        .filter(|port| *port <= MAX_PORT)
        .ok_or(EndpointError::PortOutOfRange(value))
}

/// A validated `host:port` destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint {
    host: Host,
    port: u16,
    raw: String,
}

impl Endpoint {
    /// Validate a dynamically typed endpoint. Anything but a JSON string fails.
    pub fn from_value(value: &Value) -> Result<Self, EndpointError> {
        match value {
            Value::String(s) => s.parse(),
            other => Err(EndpointError::NotText(kind_of(other))),
        }
    }

    /// The parsed address.
    pub fn host(&self) -> Host {
        self.host
    }

    /// The port, at most [`MAX_PORT`].
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The endpoint exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `host:port` suitable for a URL authority (IPv6 hosts bracketed).
    pub fn authority(&self) -> String {
        match self.host {
            Host::V4(addr) => format!("{addr}:{}", self.port),
            Host::V6(addr) => format!("[{addr}]:{}", self.port),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::MissingSeparator(s.to_string()))?;

        Ok(Self {
            host: host.parse()?,
            port: parse_port(port)?,
            raw: s.to_string(),
        })
    }
}

impl TryFrom<String> for Endpoint {
    type Error = EndpointError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.raw
    }
}

/// Whether `value` names a usable destination.
pub fn validate_server(value: &Value) -> bool {
    Endpoint::from_value(value).is_ok()
}

/// Error validating an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("endpoint must be text, got {0}")]
    NotText(&'static str),
    #[error("endpoint must contain ':' separator, got: {0}")]
    MissingSeparator(String),
    #[error("not an IPv4 or IPv6 address: {0}")]
    InvalidHost(String),
    #[error("port must be decimal digits, got: {0:?}")]
    InvalidPort(String),
    #[error("port {0} exceeds {max}", max = MAX_PORT)]
    PortOutOfRange(u64),
}
