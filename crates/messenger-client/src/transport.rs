//! The HTTP transport capability.

use crate::connector::BoxError;
use messenger_core::Endpoint;

/// Opens connections to a destination endpoint.
pub trait HttpTransport {
    type Connection: HttpConnection;

    fn open(&mut self, endpoint: &Endpoint) -> Result<Self::Connection, TransportError>;
}

/// One open HTTP connection.
///
/// Callers issue `request`, then `response_status`, then `close`. `close` is
/// called exactly once per opened connection.
pub trait HttpConnection {
    fn request(&mut self, method: &str, path: &str, body: &str) -> Result<(), TransportError>;

    fn response_status(&mut self) -> Result<u16, TransportError>;

    fn close(&mut self);
}

/// Failure inside the transport (refused, timed out, malformed response).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(BoxError);

impl TransportError {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e)
    }
}
