//! Error taxonomy and the integer result-code contract.

use crate::{EndpointError, MessageError};

/// Operation succeeded.
pub const CODE_OK: i32 = 0;
/// Connector raised, service not established, or transport failed.
pub const CODE_FAILURE: i32 = 1;
/// Message or endpoint failed validation.
pub const CODE_INVALID: i32 = 2;

/// Errors returned by messenger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessengerError {
    /// The connector ran and reported a nonzero status.
    #[error("connector returned status {0}")]
    ConnectorStatus(i32),
    /// The connector could not run to completion.
    #[error("connector failed: {0}")]
    ConnectorFailed(String),
    #[error("service connection not established")]
    NotEstablished,
    #[error(transparent)]
    InvalidMessage(#[from] MessageError),
    #[error(transparent)]
    InvalidEndpoint(#[from] EndpointError),
    #[error("no accepted message to dispatch")]
    NothingToDispatch,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    UnexpectedStatus(u16),
}

impl MessengerError {
    /// The wire-level result code for this error.
    ///
    /// A nonzero connector status is passed through unchanged.
    pub fn code(&self) -> i32 {
        match self {
            Self::ConnectorStatus(status) => *status,
            Self::InvalidMessage(_) | Self::InvalidEndpoint(_) => CODE_INVALID,
            Self::ConnectorFailed(_)
            | Self::NotEstablished
            | Self::NothingToDispatch
            | Self::Transport(_)
            | Self::UnexpectedStatus(_) => CODE_FAILURE,
        }
    }
}

/// Collapse a messenger result into its integer code.
pub trait ResultCodeExt {
    fn result_code(&self) -> i32;
}

impl<T> ResultCodeExt for Result<T, MessengerError> {
    fn result_code(&self) -> i32 {
        match self {
            Ok(_) => CODE_OK,
            Err(e) => e.code(),
        }
    }
}
