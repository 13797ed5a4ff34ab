//! # Billing Resources
//!
//! Concrete resource types for the billing API, declared on top of
//! [`resource_framework`].
//!
//! - **[model]**: descriptors and pre-condition hooks for [`Purchase`](model::Purchase),
//!   [`Account`](model::Account) and [`Coupon`](model::Coupon).
//! - **[clients]**: typed wrappers such as [`PurchaseClient`](clients::PurchaseClient).
//! - **[system]**: wires every client onto one shared transport.

pub mod clients;
pub mod error;
pub mod model;
pub mod system;

pub use error::BillingError;
pub use system::BillingSystem;
