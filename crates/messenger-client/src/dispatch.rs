//! Validating sends and handing them to the HTTP transport.

use crate::{HttpConnection, HttpTransport};
use messenger_core::{ConnectionState, Endpoint, MessengerError, PendingSend, message_text};
use serde_json::Value;

/// Resource every dispatched message is posted to.
pub const DISPATCH_PATH: &str = "/";

/// The only response status treated as delivered.
pub const SUCCESS_STATUS: u16 = 200;

/// Holds the last accepted send until it is dispatched or replaced.
#[derive(Debug, Default)]
pub struct SendDispatcher {
    pending: Option<PendingSend>,
}

impl SendDispatcher {
    /// Create a dispatcher with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `message` and `server` and, if both pass, keep them as the
    /// pending send.
    ///
    /// Nothing is checked while `state` is disconnected. The pending send is
    /// left untouched on every error.
    pub fn send(
        &mut self,
        state: ConnectionState,
        message: &Value,
        server: &Value,
    ) -> Result<(), MessengerError> {
        if !state.is_established() {
            tracing::warn!("Send refused: service connection not established");
            return Err(MessengerError::NotEstablished);
        }

        let (text, endpoint) = match validate(message, server) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("Send rejected: {}", e);
                return Err(e);
            }
        };

        tracing::debug!("Accepted {} byte message for {}", text.len(), endpoint);
        self.pending = Some(PendingSend::new(text, endpoint));
        Ok(())
    }

    /// The last accepted send, if any.
    pub fn pending(&self) -> Option<&PendingSend> {
        self.pending.as_ref()
    }

    /// POST the pending message to its endpoint.
    ///
    /// Once a connection is open it is closed before returning, whatever the
    /// request or response did.
    pub fn dispatch<T: HttpTransport>(&self, transport: &mut T) -> Result<(), MessengerError> {
        let pending = self
            .pending
            .as_ref()
            .ok_or(MessengerError::NothingToDispatch)?;

        let mut conn = transport
            .open(&pending.endpoint)
            .map_err(|e| MessengerError::Transport(e.to_string()))?;
        let status = conn
            .request("POST", DISPATCH_PATH, &pending.message)
            .and_then(|()| conn.response_status());
        conn.close();
        tracing::debug!("Closed connection to {}", pending.endpoint);

        let status = status.map_err(|e| MessengerError::Transport(e.to_string()))?;
        if status == SUCCESS_STATUS {
            tracing::info!("Delivered message to {}", pending.endpoint);
            Ok(())
        } else {
            tracing::warn!("{} responded with status {}", pending.endpoint, status);
            Err(MessengerError::UnexpectedStatus(status))
        }
    }
}

fn validate<'a>(message: &'a Value, server: &Value) -> Result<(&'a str, Endpoint), MessengerError> {
    Ok((message_text(message)?, Endpoint::from_value(server)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTransport, Step};
    use messenger_core::{CODE_FAILURE, CODE_INVALID, EndpointError, ResultCodeExt};
    use serde_json::json;

    const UP: ConnectionState = ConnectionState::Established;

    fn accepted(message: &str, server: &str) -> SendDispatcher {
        let mut dispatcher = SendDispatcher::new();
        dispatcher.send(UP, &json!(message), &json!(server)).unwrap();
        dispatcher
    }

    #[test]
    fn refuses_while_disconnected() {
        let mut dispatcher = SendDispatcher::new();
        let result = dispatcher.send(
            ConnectionState::Disconnected,
            &json!("Hi Jacob"),
            &json!("250.11.184.255:5000"),
        );
        assert_eq!(result, Err(MessengerError::NotEstablished));
        assert_eq!(result.result_code(), CODE_FAILURE);
        assert!(dispatcher.pending().is_none());

        // Invalid input does not change the answer.
        let result = dispatcher.send(ConnectionState::Disconnected, &json!([]), &json!(1));
        assert_eq!(result.result_code(), CODE_FAILURE);
    }

    #[test]
    fn stores_accepted_pair() {
        let dispatcher = accepted("Hi Jacob", "250.11.184.255:5000");
        let pending = dispatcher.pending().unwrap();
        assert_eq!(pending.message, "Hi Jacob");
        assert_eq!(pending.endpoint.as_str(), "250.11.184.255:5000");
    }

    #[test]
    fn rejected_send_keeps_previous_pending() {
        let mut dispatcher = accepted("first", "212.29.124.211:4520");
        let before = dispatcher.pending().cloned();

        for (message, server) in [
            (json!([]), json!("242.16.184.252:5000")),
            (json!({}), json!("242.16.184.252:5000")),
            (json!(true), json!("242.16.184.252:5000")),
            (json!(42), json!("242.16.184.252:5000")),
            (json!("second"), json!("212.19.124.211:65526")),
            (json!("second"), json!("268.19.124.211:5000")),
            (json!("second"), json!("212.19.124.211")),
        ] {
            let result = dispatcher.send(UP, &message, &server);
            assert_eq!(result.result_code(), CODE_INVALID, "{message} -> {server}");
            assert_eq!(dispatcher.pending().cloned(), before);
        }
    }

    #[test]
    fn later_send_overwrites_pending() {
        let mut dispatcher = accepted("first", "212.29.124.211:4520");
        dispatcher
            .send(UP, &json!("second"), &json!("::1:8080"))
            .unwrap();
        let pending = dispatcher.pending().unwrap();
        assert_eq!(pending.message, "second");
        assert_eq!(pending.endpoint.port(), 8080);
    }

    #[test]
    fn reports_endpoint_reason() {
        let mut dispatcher = SendDispatcher::new();
        assert_eq!(
            dispatcher.send(UP, &json!("hi"), &json!("212.19.124.211:70525")),
            Err(MessengerError::InvalidEndpoint(EndpointError::PortOutOfRange(70525)))
        );
    }

    #[test]
    fn dispatch_posts_message_and_closes() {
        let dispatcher = accepted("Hi Jacob", "250.11.184.255:5000");
        let mut transport = FakeTransport::responding(200);

        assert_eq!(dispatcher.dispatch(&mut transport), Ok(()));

        let log = transport.log();
        assert_eq!(log.opened, ["250.11.184.255:5000"]);
        assert_eq!(
            log.requests,
            [("POST".to_string(), "/".to_string(), "Hi Jacob".to_string())]
        );
        assert_eq!(log.steps, [Step::Open, Step::Request, Step::Status, Step::Close]);
        assert_eq!(log.closes, 1);
    }

    #[test]
    fn dispatch_non_200_fails_and_still_closes() {
        for status in [404, 400, 403, 408, 201, 500] {
            let dispatcher = accepted("Hi Jacob", "250.11.184.255:5000");
            let mut transport = FakeTransport::responding(status);

            let result = dispatcher.dispatch(&mut transport);
            assert_eq!(result, Err(MessengerError::UnexpectedStatus(status)));
            assert_eq!(result.result_code(), CODE_FAILURE);
            assert_eq!(transport.log().closes, 1);
        }
    }

    #[test]
    fn dispatch_transport_errors_still_close() {
        let dispatcher = accepted("Hi Jacob", "250.11.184.255:5000");

        let mut transport = FakeTransport::failing_request();
        assert_eq!(dispatcher.dispatch(&mut transport).result_code(), CODE_FAILURE);
        assert_eq!(transport.log().steps, [Step::Open, Step::Request, Step::Close]);

        let mut transport = FakeTransport::failing_status();
        assert_eq!(dispatcher.dispatch(&mut transport).result_code(), CODE_FAILURE);
        assert_eq!(transport.log().closes, 1);
    }

    #[test]
    fn dispatch_open_failure_has_nothing_to_close() {
        let dispatcher = accepted("Hi Jacob", "250.11.184.255:5000");
        let mut transport = FakeTransport::failing_open();
        assert!(matches!(
            dispatcher.dispatch(&mut transport),
            Err(MessengerError::Transport(_))
        ));
        assert_eq!(transport.log().closes, 0);
    }

    #[test]
    fn dispatch_without_send() {
        let mut transport = FakeTransport::responding(200);
        assert_eq!(
            SendDispatcher::new().dispatch(&mut transport),
            Err(MessengerError::NothingToDispatch)
        );
        assert!(transport.log().steps.is_empty());
    }
}
