use resource_framework::{ConfigError, ResourceError};

/// Top-level error for applications built on the billing clients.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}
