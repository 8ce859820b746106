//! Blocking HTTP transport backed by `reqwest`.

use messenger_client::{HttpConnection, HttpTransport, TransportError};
use messenger_core::Endpoint;
use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONNECTION;
use std::time::Duration;

/// Opens plain-HTTP connections with a shared blocking client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::new)?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    type Connection = ReqwestConnection;

    fn open(&mut self, endpoint: &Endpoint) -> Result<ReqwestConnection, TransportError> {
        Ok(ReqwestConnection {
            client: self.client.clone(),
            base: format!("http://{}", endpoint.authority()),
            response: None,
        })
    }
}

/// A connection to one endpoint. Requests ask the server to close afterwards.
pub struct ReqwestConnection {
    client: Client,
    base: String,
    response: Option<Response>,
}

impl HttpConnection for ReqwestConnection {
    fn request(&mut self, method: &str, path: &str, body: &str) -> Result<(), TransportError> {
        let method = Method::from_bytes(method.as_bytes()).map_err(TransportError::new)?;
        let url = format!("{}{}", self.base, path);
        tracing::debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, url)
            .header(CONNECTION, "close")
            .body(body.to_owned())
            .send()
            .map_err(TransportError::new)?;
        self.response = Some(response);
        Ok(())
    }

    fn response_status(&mut self) -> Result<u16, TransportError> {
        self.response
            .as_ref()
            .map(|r| r.status().as_u16())
            .ok_or_else(|| TransportError::new("no request has been sent"))
    }

    fn close(&mut self) {
        self.response = None;
        tracing::trace!("Closed connection to {}", self.base);
    }
}
