//! TCP reachability connector.

use messenger_client::{Connector, ConnectorError};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Connector that succeeds when the service address accepts a TCP connection.
///
/// The probe connection is dropped immediately.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl Connector<SocketAddr> for TcpProbe {
    fn connect(&mut self, service: &SocketAddr) -> Result<i32, ConnectorError> {
        tracing::debug!("Probing {} (timeout {:?})", service, self.timeout);
        TcpStream::connect_timeout(service, self.timeout)?;
        Ok(0)
    }
}
