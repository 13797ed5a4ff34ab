//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose level is
//! controlled by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Spans**: one per client operation (`create`, `fetch`, `update`, `delete`, `list`),
//!   carrying the `resource` field.
//! - **`debug`**: verb, path and encoded body of every outgoing request; undeclared
//!   fields ignored at construction.
//! - **`info`**: each successful round trip with the resulting identity.
//! - **`warn`**: each normalized failure with its kind and status.
//!
//! ```bash
//! RUST_LOG=info cargo run -p billing-resources
//! RUST_LOG=resource_framework=debug cargo run -p billing-resources
//! ```
//!
//! ```text
//! INFO create_at{resource="purchase"}: Synced verb=POST id="-"
//! WARN create{resource="purchase"}: Request failed verb=POST path=/purchases kind=api status=Some(422) error=API error (status 422): purchase.currency can't be blank
//! ```
//!
//! Request bodies are only logged at `debug`; headers (and therefore credentials) never are.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // The span already names the resource.
        .compact()
        .init();
}
