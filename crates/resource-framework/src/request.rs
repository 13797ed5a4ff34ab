//! # Requests and Responses
//!
//! The values exchanged between the generic client and a [`Transport`](crate::Transport):
//! an [`ApiRequest`] goes out, a [`RawResponse`] comes back. Each operation also names the
//! set of statuses it accepts as success.

use std::fmt;

/// HTTP verbs used by resource operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One outgoing request: verb, path relative to the API base, and an encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub verb: Verb,
    pub path: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(verb: Verb, path: impl Into<String>, body: Option<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            body,
        }
    }
}

/// What the transport got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Statuses an operation treats as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedStatus(pub &'static [u16]);

impl AcceptedStatus {
    pub const CREATE: AcceptedStatus = AcceptedStatus(&[200, 201, 204]);
    pub const FETCH: AcceptedStatus = AcceptedStatus(&[200]);
    pub const UPDATE: AcceptedStatus = AcceptedStatus(&[200, 201, 204]);
    pub const DELETE: AcceptedStatus = AcceptedStatus(&[200, 204]);
    pub const LIST: AcceptedStatus = AcceptedStatus(&[200]);

    pub fn contains(&self, status: u16) -> bool {
        self.0.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_sets() {
        assert!(AcceptedStatus::CREATE.contains(201));
        assert!(AcceptedStatus::CREATE.contains(204));
        assert!(!AcceptedStatus::CREATE.contains(422));
        assert!(!AcceptedStatus::FETCH.contains(204));
        assert!(AcceptedStatus::DELETE.contains(204));
    }

    #[test]
    fn test_verb_display() {
        assert_eq!(Verb::Delete.to_string(), "DELETE");
    }
}
