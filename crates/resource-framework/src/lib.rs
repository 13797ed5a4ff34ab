//! # Resource Framework
//!
//! Building blocks for client libraries that talk to a remote, XML-speaking REST API in
//! terms of *resources*: named, declaratively described object types that support a
//! uniform set of operations (create, fetch, update, delete, list) plus the odd
//! resource-specific action.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Description Layer** ([`ResourceDescriptor`], [`ResourceKind`]) - what a resource
//!    looks like on the wire and which pre-conditions its writes have
//! 2. **Instance Layer** ([`Resource`], [`Value`]) - field state, identity, and the
//!    serialize/inflate pair that moves it across the wire
//! 3. **Interface Layer** ([`ResourceClient`], [`Transport`], [`MarkupCodec`]) - one
//!    request pipeline shared by every resource kind
//!
//! A concrete resource is therefore *data plus hooks*. Adding one means writing a
//! descriptor and, optionally, a `validate` override; every verb comes for free.
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::request::Verb;
//! use resource_framework::{fields, Api, ResourceDescriptor, ResourceKind, Value, XmlCodec};
//! use std::sync::Arc;
//!
//! // 1. Describe the resource
//! static ACCOUNT: ResourceDescriptor = ResourceDescriptor::new(
//!     &["account_code", "email"],
//!     "account_code",
//!     "account",
//!     "accounts",
//!     false,
//! );
//! struct Account;
//! impl ResourceKind for Account {
//!     fn descriptor() -> &'static ResourceDescriptor { &ACCOUNT }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Verb::Get, "/accounts/a1").return_status(
//!         200,
//!         "<account><account_code>a1</account_code><email>x@example.com</email></account>",
//!     );
//!
//!     // 2. Use the generic client
//!     let api = Api::new(Arc::new(mock), Arc::new(XmlCodec::default()));
//!     let account = api.resource::<Account>().fetch("a1").await.unwrap();
//!     assert_eq!(account.get("email"), Some(&Value::from("x@example.com")));
//! }
//! ```
//!
//! ## Error Model
//!
//! Every operation returns one [`ResourceError`], classified by [`ErrorKind`]:
//! validation (caught before any I/O), connection (no response), API (rejected status),
//! or decode (accepted status, unreadable body).
//!
//! ## Testing
//!
//! [`mock::MockTransport`] stands in for the HTTP transport so that client logic can be
//! tested without a network. See the [`mock`] module.

pub mod client;
pub mod client_trait;
pub mod codec;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod mock;
pub mod normalize;
pub mod request;
pub mod resource;
pub mod tracing;
pub mod transport;
pub mod value;

// Re-export core types for convenience
pub use client::{Api, ResourceClient};
pub use client_trait::ResourceApi;
pub use codec::{CodecConfig, MarkupCodec, Marker, Payload, XmlCodec};
pub use config::{ClientConfig, ConfigError};
pub use descriptor::ResourceDescriptor;
pub use error::{ErrorKind, ResourceError};
pub use kind::{ResourceKind, WriteAction};
pub use resource::{LifecycleState, Resource};
pub use transport::{HttpTransport, Transport, TransportError};
pub use value::{Fields, Value};
