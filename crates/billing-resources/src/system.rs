//! # Billing System Wiring
//!
//! Builds one shared [`Api`] (transport + codec) and hands a typed client for each
//! resource type to the caller.
//!
//! ```rust,no_run
//! use billing_resources::BillingSystem;
//! use resource_framework::ClientConfig;
//!
//! # fn demo() -> Result<(), billing_resources::BillingError> {
//! let config = ClientConfig::from_env()?;
//! let system = BillingSystem::from_config(&config)?;
//! let _purchases = system.purchases.clone();
//! # Ok(())
//! # }
//! ```
//!
//! All clients share the same connection pool. Nothing needs shutting down; dropping the
//! system drops the pool.

use crate::clients::{AccountClient, CouponClient, PurchaseClient};
use resource_framework::{Api, ClientConfig, ConfigError};
use tracing::info;

/// Typed clients for every billing resource, sharing one transport.
#[derive(Clone)]
pub struct BillingSystem {
    pub purchases: PurchaseClient,
    pub accounts: AccountClient,
    pub coupons: CouponClient,
}

impl BillingSystem {
    pub fn new(api: Api) -> Self {
        Self {
            purchases: PurchaseClient::new(api.resource()),
            accounts: AccountClient::new(api.resource()),
            coupons: CouponClient::new(api.resource()),
        }
    }

    /// Builds the HTTP transport and XML codec described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let api = Api::from_config(config)?;
        info!(base_url = %config.base_url, "Billing clients ready");
        Ok(Self::new(api))
    }
}
