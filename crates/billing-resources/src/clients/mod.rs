//! # Billing Clients
//!
//! Thin typed wrappers over [`ResourceClient`](resource_framework::ResourceClient), one per
//! resource type. `fetch`, `list` and `delete` come from
//! [`ResourceApi`](resource_framework::ResourceApi); each wrapper adds the writes and
//! actions its resource supports.

mod account_client;
mod coupon_client;
mod purchase_client;

pub use account_client::AccountClient;
pub use coupon_client::CouponClient;
pub use purchase_client::PurchaseClient;
