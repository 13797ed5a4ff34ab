//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Tests queue the
//! responses they expect the server to give, run real client code against it, and then
//! inspect what was sent.
//!
//! ## When to use the Mock vs a real endpoint
//!
//! | Feature | MockTransport | HttpTransport |
//! |---------|---------------|---------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | 100% Deterministic | Subject to the remote service |
//! | **Error Injection** | Easy (`return_status(422, ..)`, `return_connection_error`) | Hard |
//! | **Use Case** | Client and resource logic | Smoke tests against a sandbox |
//!
//! ## Example
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::request::Verb;
//! use resource_framework::{fields, Api, ResourceDescriptor, ResourceKind, XmlCodec};
//! use std::sync::Arc;
//!
//! static NOTE: ResourceDescriptor =
//!     ResourceDescriptor::new(&["body"], "id", "note", "notes", false);
//! struct Note;
//! impl ResourceKind for Note {
//!     fn descriptor() -> &'static ResourceDescriptor { &NOTE }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // 1. Queue the server's answers
//!     let mock = MockTransport::new();
//!     mock.expect(Verb::Post, "/notes")
//!         .return_status(201, "<note><id>n1</id><body>hi</body></note>");
//!
//!     // 2. Run real client code against the mock
//!     let api = Api::new(Arc::new(mock.clone()), Arc::new(XmlCodec::default()));
//!     let note = api.resource::<Note>().create(fields! { "body" => "hi" }).await.unwrap();
//!     assert_eq!(note.id(), Some("n1"));
//!
//!     // 3. Check what went over the wire
//!     assert!(mock.requests()[0].body.as_deref().unwrap().contains("<body>hi</body>"));
//!     mock.verify();
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! Connection failures that are hard to provoke against a live service are one line:
//!
//! ```rust,ignore
//! mock.expect(Verb::Get, "/notes/n1").return_connection_error("connection reset");
//! ```
//!
//! A request that matches no queued expectation panics, which fails the test.

use crate::request::{ApiRequest, RawResponse, Verb};
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One queued answer for a request with a known verb and path.
struct Expectation {
    verb: Verb,
    path: String,
    response: Result<RawResponse, TransportError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<ApiRequest>,
}

/// In-memory transport with a FIFO of expectations. Clones share the same queue.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the next request to be `verb path`. `path` includes any query string.
    pub fn expect(&self, verb: Verb, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            verb,
            path: path.into(),
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    verb: Verb,
    path: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Answers with `status` and `body`.
    pub fn return_status(self, status: u16, body: impl Into<String>) {
        self.push(Ok(RawResponse::new(status, body)));
    }

    /// Fails as if the server could not be reached.
    pub fn return_connection_error(self, message: impl Into<String>) {
        self.push(Err(TransportError(message.into())));
    }

    fn push(self, response: Result<RawResponse, TransportError>) {
        self.state.lock().expectations.push_back(Expectation {
            verb: self.verb,
            path: self.path,
            response,
        });
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut state = self.state.lock();
        let expectation = state.expectations.pop_front();
        let summary = format!("{} {}", request.verb, request.path);
        state.requests.push(request);
        drop(state);

        match expectation {
            Some(exp) if format!("{} {}", exp.verb, exp.path) == summary => exp.response,
            Some(exp) => panic!(
                "Unexpected request {summary}, expected {} {}",
                exp.verb, exp.path
            ),
            None => panic!("Unexpected request {summary}, no expectations left"),
        }
    }
}
