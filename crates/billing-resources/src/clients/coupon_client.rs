//! # Coupon Client
use crate::model::Coupon;
use resource_framework::{Fields, Resource, ResourceApi, ResourceClient, ResourceError};
use tracing::{debug, instrument};

/// Client for the coupons endpoint.
#[derive(Clone)]
pub struct CouponClient {
    inner: ResourceClient<Coupon>,
}

impl CouponClient {
    pub fn new(inner: ResourceClient<Coupon>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, options))]
    pub async fn create_coupon(&self, options: Fields) -> Result<Resource, ResourceError> {
        debug!(?options, "create_coupon called");
        self.inner.create(options).await
    }

    /// Coupons currently open for redemption.
    #[instrument(skip(self))]
    pub async fn redeemable(&self) -> Result<Vec<Resource>, ResourceError> {
        self.list(&[("state", "redeemable")]).await
    }
}

impl ResourceApi<Coupon> for CouponClient {
    fn inner(&self) -> &ResourceClient<Coupon> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockTransport;
    use resource_framework::request::Verb;
    use resource_framework::{Api, XmlCodec};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_redeemable_lists_with_filter() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/coupons?state=redeemable").return_status(
            200,
            r#"<coupons type="array">
                <coupon><coupon_code>spring</coupon_code><name>Spring</name></coupon>
            </coupons>"#,
        );
        let api = Api::new(Arc::new(mock.clone()), Arc::new(XmlCodec::default()));
        let coupons = CouponClient::new(api.resource()).redeemable().await.unwrap();

        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0].id(), Some("spring"));
        mock.verify();
    }
}
