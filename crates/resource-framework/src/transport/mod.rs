//! # Transport
//!
//! The boundary to the network. The framework never opens connections or builds
//! credentials itself; it hands a verb, a path and an already-encoded body to a
//! [`Transport`] and gets back a status and body, or a [`TransportError`] when no
//! response was obtained.
//!
//! - [`HttpTransport`] is the `reqwest` implementation used in production.
//! - [`MockTransport`](crate::mock::MockTransport) replays scripted responses in tests.

pub mod http;

pub use http::HttpTransport;

use crate::request::{ApiRequest, RawResponse};
use async_trait::async_trait;

/// The exchange could not be completed: nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one request and reports the raw outcome.
///
/// Implementations must not interpret the status code; classifying responses is the
/// job of [`normalize`](crate::normalize::normalize).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}
