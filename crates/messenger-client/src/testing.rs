//! Recording fakes for the transport capability.

use crate::{HttpConnection, HttpTransport, TransportError};
use messenger_core::Endpoint;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Open,
    Request,
    Status,
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct CallLog {
    pub opened: Vec<String>,
    pub requests: Vec<(String, String, String)>,
    pub steps: Vec<Step>,
    pub closes: usize,
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    None,
    Open,
    Request,
    Status,
}

pub struct FakeTransport {
    status: u16,
    failure: Failure,
    log: Rc<RefCell<CallLog>>,
}

impl FakeTransport {
    fn new(status: u16, failure: Failure) -> Self {
        Self {
            status,
            failure,
            log: Rc::default(),
        }
    }

    pub fn responding(status: u16) -> Self {
        Self::new(status, Failure::None)
    }

    pub fn failing_open() -> Self {
        Self::new(200, Failure::Open)
    }

    pub fn failing_request() -> Self {
        Self::new(200, Failure::Request)
    }

    pub fn failing_status() -> Self {
        Self::new(200, Failure::Status)
    }

    pub fn log(&self) -> CallLog {
        self.log.borrow().clone()
    }
}

impl HttpTransport for FakeTransport {
    type Connection = FakeConnection;

    fn open(&mut self, endpoint: &Endpoint) -> Result<FakeConnection, TransportError> {
        let mut log = self.log.borrow_mut();
        log.steps.push(Step::Open);
        if matches!(self.failure, Failure::Open) {
            return Err(TransportError::new("connection refused"));
        }
        log.opened.push(endpoint.to_string());
        Ok(FakeConnection {
            status: self.status,
            failure: self.failure,
            log: self.log.clone(),
        })
    }
}

pub struct FakeConnection {
    status: u16,
    failure: Failure,
    log: Rc<RefCell<CallLog>>,
}

impl HttpConnection for FakeConnection {
    fn request(&mut self, method: &str, path: &str, body: &str) -> Result<(), TransportError> {
        let mut log = self.log.borrow_mut();
        log.steps.push(Step::Request);
        if matches!(self.failure, Failure::Request) {
            return Err(TransportError::new("broken pipe"));
        }
        log.requests
            .push((method.to_string(), path.to_string(), body.to_string()));
        Ok(())
    }

    fn response_status(&mut self) -> Result<u16, TransportError> {
        self.log.borrow_mut().steps.push(Step::Status);
        match self.failure {
            Failure::Status => Err(TransportError::new("malformed status line")),
            _ => Ok(self.status),
        }
    }

    fn close(&mut self) {
        let mut log = self.log.borrow_mut();
        log.steps.push(Step::Close);
        log.closes += 1;
    }
}
