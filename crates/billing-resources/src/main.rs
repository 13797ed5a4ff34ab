//! # Billing Demo
//!
//! Previews a one-off charge against the account given on the command line, then
//! creates it. Configuration comes from the environment (see
//! [`ClientConfig::from_env`](resource_framework::ClientConfig::from_env)).
//!
//! ```bash
//! BILLING_API_BASE_URL=https://acme.example.com/v2 \
//! BILLING_API_AUTHORIZATION="Basic ..." \
//! RUST_LOG=info cargo run -p billing-resources -- my-account-code
//! ```

use billing_resources::{BillingError, BillingSystem};
use resource_framework::tracing::setup_tracing;
use resource_framework::{fields, ClientConfig};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), BillingError> {
    setup_tracing();

    let account_code = std::env::args().nth(1).unwrap_or_else(|| "demo-account".to_string());
    let config = ClientConfig::from_env()?;
    let system = BillingSystem::from_config(&config)?;

    let options = fields! {
        "account" => fields! { "account_code" => account_code.as_str() },
        "currency" => "USD",
        "collection_method" => "automatic",
        "adjustments" => fields! {
            "adjustment" => fields! {
                "description" => "Setup fee",
                "unit_amount_in_cents" => 5000,
                "quantity" => 1,
            },
        },
    };

    let span = tracing::info_span!("checkout", %account_code);
    let result = async {
        let preview = system.purchases.preview(options.clone()).await?;
        info!(fields = preview.fields().len(), "Preview priced");
        system.purchases.create_purchase(options).await
    }
    .instrument(span)
    .await;

    match result {
        Ok(purchase) => info!(uuid = ?purchase.id(), "Purchase completed"),
        Err(e) => {
            error!(kind = %e.kind(), status = ?e.status(), error = %e, "Purchase failed");
            return Err(e.into());
        }
    }
    Ok(())
}
