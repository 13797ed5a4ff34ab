//! # Purchase Client
//!
//! Provides a high-level API for the `purchases` endpoint: checkout and preview.
use crate::model::{Purchase, PREVIEW};
use resource_framework::{Fields, Resource, ResourceApi, ResourceClient, ResourceError};
use tracing::{debug, info, instrument};

/// Client for the purchases endpoint.
#[derive(Clone)]
pub struct PurchaseClient {
    inner: ResourceClient<Purchase>,
}

impl PurchaseClient {
    pub fn new(inner: ResourceClient<Purchase>) -> Self {
        Self { inner }
    }

    /// Submits a purchase and returns it as the server recorded it.
    ///
    /// Fails with a validation error, without contacting the server, unless `options`
    /// carries an account, at least one of subscriptions or adjustments, and a currency
    /// whenever adjustments are present.
    #[instrument(skip(self, options))]
    pub async fn create_purchase(&self, options: Fields) -> Result<Resource, ResourceError> {
        debug!(?options, "create_purchase called");
        let purchase = self.inner.create(options).await?;
        info!(uuid = ?purchase.id(), "Purchase created");
        Ok(purchase)
    }

    /// Prices a purchase without persisting it. Same pre-conditions as
    /// [`create_purchase`](Self::create_purchase).
    #[instrument(skip(self, options))]
    pub async fn preview(&self, options: Fields) -> Result<Resource, ResourceError> {
        debug!(?options, "preview called");
        self.inner.create_at(PREVIEW, "preview", options).await
    }
}

impl ResourceApi<Purchase> for PurchaseClient {
    fn inner(&self) -> &ResourceClient<Purchase> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockTransport;
    use resource_framework::request::Verb;
    use resource_framework::{fields, Api, ErrorKind, LifecycleState, Value, XmlCodec};
    use std::sync::Arc;

    fn client(mock: &MockTransport) -> PurchaseClient {
        let api = Api::new(Arc::new(mock.clone()), Arc::new(XmlCodec::default()));
        PurchaseClient::new(api.resource())
    }

    fn options() -> Fields {
        fields! {
            "account" => fields! { "account_code" => "a1" },
            "currency" => "USD",
            "adjustments" => fields! {
                "adjustment" => fields! { "unit_amount_in_cents" => 1000, "quantity" => 1 },
            },
        }
    }

    #[tokio::test]
    async fn test_preview_posts_to_preview_path() {
        let mock = MockTransport::new();
        mock.expect(Verb::Post, "/purchases/preview").return_status(
            200,
            "<invoice_collection><charge_invoice><total_in_cents>1000</total_in_cents></charge_invoice></invoice_collection>",
        );

        let preview = client(&mock).preview(options()).await.unwrap();
        assert_eq!(preview.state(), LifecycleState::Synced);
        assert_eq!(
            preview
                .get("charge_invoice")
                .and_then(|v| v.get("total_in_cents"))
                .and_then(Value::as_i64),
            Some(1000)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_preview_validation_uses_preview_label() {
        let mock = MockTransport::new();
        let err = client(&mock)
            .preview(fields! { "currency" => "USD" })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "preview must include \"account\" information");
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_purchase_body_covers_every_property() {
        let mock = MockTransport::new();
        mock.expect(Verb::Post, "/purchases")
            .return_status(201, "<purchase><uuid>p-1</uuid></purchase>");

        let purchase = client(&mock).create_purchase(options()).await.unwrap();
        assert_eq!(purchase.id(), Some("p-1"));

        // Enumerable: unset properties still go out as empty elements.
        let body = mock.requests()[0].body.clone().unwrap();
        assert!(body.contains("<account><account_code>a1</account_code></account>"));
        assert!(body.contains("<po_number></po_number>"));
        assert!(body.contains("<shipping_address_id></shipping_address_id>"));
    }
}
