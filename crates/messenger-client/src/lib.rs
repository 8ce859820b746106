//! Client side of the outbound messenger.
//!
//! A [`Messenger`] connects to a service through an injected [`Connector`],
//! validates outbound sends, and posts accepted messages through an injected
//! [`HttpTransport`]. Nothing here opens sockets or retries.

mod connection;
mod connector;
mod dispatch;
mod transport;

#[cfg(test)]
mod testing;

pub use connection::ConnectionManager;
pub use connector::{BoxError, Connector, ConnectorError};
pub use dispatch::{DISPATCH_PATH, SUCCESS_STATUS, SendDispatcher};
pub use transport::{HttpConnection, HttpTransport, TransportError};

use messenger_core::{ConnectionState, MessengerError, PendingSend};
use serde_json::Value;

/// Connection manager and send dispatcher for one service.
pub struct Messenger<S, C> {
    connection: ConnectionManager<S, C>,
    dispatcher: SendDispatcher,
}

impl<S, C: Connector<S>> Messenger<S, C> {
    pub fn new(service: S, connector: C) -> Self {
        Self {
            connection: ConnectionManager::new(service, connector),
            dispatcher: SendDispatcher::new(),
        }
    }

    /// See [`ConnectionManager::establish`].
    pub fn establish(&mut self) -> Result<(), MessengerError> {
        self.connection.establish()
    }

    /// See [`SendDispatcher::send`].
    pub fn send(
        &mut self,
        message: impl Into<Value>,
        server: impl Into<Value>,
    ) -> Result<(), MessengerError> {
        self.dispatcher
            .send(self.connection.state(), &message.into(), &server.into())
    }

    /// See [`SendDispatcher::dispatch`].
    pub fn dispatch<T: HttpTransport>(&self, transport: &mut T) -> Result<(), MessengerError> {
        self.dispatcher.dispatch(transport)
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn is_established(&self) -> bool {
        self.connection.is_established()
    }

    pub fn pending(&self) -> Option<&PendingSend> {
        self.dispatcher.pending()
    }

    pub fn service(&self) -> &S {
        self.connection.service()
    }
}
