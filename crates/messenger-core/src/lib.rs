//! Core types for the outbound messenger.
//!
//! This crate provides the validation grammar and the result-code contract.
//! It performs no I/O; connectors and transports live in other crates.

mod endpoint;
mod error;
mod message;

pub use endpoint::{Endpoint, EndpointError, Host, MAX_PORT, validate_server};
pub use error::{CODE_FAILURE, CODE_INVALID, CODE_OK, MessengerError, ResultCodeExt};
pub use message::{MessageError, PendingSend, message_text, validate_message};

/// Service connection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No successful connector call yet, or the latest one failed.
    #[default]
    Disconnected,
    /// The latest connector call returned status 0.
    Established,
}

impl ConnectionState {
    /// State implied by a raw connector status.
    pub fn from_status(status: i32) -> Self {
        if status == 0 {
            Self::Established
        } else {
            Self::Disconnected
        }
    }

    pub fn is_established(self) -> bool {
        self == Self::Established
    }
}
