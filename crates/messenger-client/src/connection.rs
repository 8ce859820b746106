//! Service connection state.

use crate::Connector;
use messenger_core::{ConnectionState, MessengerError};

/// Drives the connector and remembers whether the last attempt succeeded.
pub struct ConnectionManager<S, C> {
    service: S,
    connector: C,
    state: ConnectionState,
}

impl<S, C: Connector<S>> ConnectionManager<S, C> {
    /// Create a manager that starts disconnected.
    pub fn new(service: S, connector: C) -> Self {
        Self {
            service,
            connector,
            state: ConnectionState::Disconnected,
        }
    }

    /// Invoke the connector once and record the outcome.
    ///
    /// A nonzero status comes back as [`MessengerError::ConnectorStatus`]
    /// carrying that status. A connector error leaves the state disconnected.
    pub fn establish(&mut self) -> Result<(), MessengerError> {
        tracing::debug!("Invoking connector");
        let status = match self.connector.connect(&self.service) {
            Ok(status) => status,
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                tracing::warn!("Connector failed: {}", e);
                return Err(MessengerError::ConnectorFailed(e.to_string()));
            }
        };

        self.state = ConnectionState::from_status(status);
        if self.state.is_established() {
            tracing::info!("Service connection established");
            Ok(())
        } else {
            tracing::warn!("Connector returned status {}", status);
            Err(MessengerError::ConnectorStatus(status))
        }
    }

    /// Outcome of the latest `establish`.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Check if the latest connector call returned 0.
    pub fn is_established(&self) -> bool {
        self.state.is_established()
    }

    /// The service handle passed to the connector.
    pub fn service(&self) -> &S {
        &self.service
    }
}
