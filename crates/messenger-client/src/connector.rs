//! The connector capability.

/// Boxed error produced by an injected collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Attempts a logical connection to a service.
///
/// `Ok(0)` means connected. Any other `Ok` status is a connector-specific
/// failure code. `Err` means the attempt itself could not be made.
pub trait Connector<S> {
    fn connect(&mut self, service: &S) -> Result<i32, ConnectorError>;
}

impl<S, F> Connector<S> for F
where
    F: FnMut(&S) -> Result<i32, ConnectorError>,
{
    fn connect(&mut self, service: &S) -> Result<i32, ConnectorError> {
        self(service)
    }
}

/// A connector that could not run to completion.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ConnectorError(BoxError);

impl ConnectorError {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }
}

impl From<std::io::Error> for ConnectorError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e)
    }
}
