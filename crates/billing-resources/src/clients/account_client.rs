//! # Account Client
use crate::model::Account;
use resource_framework::{Fields, Resource, ResourceApi, ResourceClient, ResourceError};
use tracing::{debug, instrument};

/// Client for the accounts endpoint.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, options))]
    pub async fn create_account(&self, options: Fields) -> Result<Resource, ResourceError> {
        debug!(?options, "create_account called");
        self.inner.create(options).await
    }

    /// Pushes the declared fields of a fetched or created account back to the server.
    #[instrument(skip(self, account), fields(account_code = ?account.id()))]
    pub async fn update_account(&self, account: &Resource) -> Result<Resource, ResourceError> {
        self.inner.update(account).await
    }
}

impl ResourceApi<Account> for AccountClient {
    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockTransport;
    use resource_framework::request::Verb;
    use resource_framework::{fields, Api, Value, XmlCodec};
    use std::sync::Arc;

    fn client(mock: &MockTransport) -> AccountClient {
        let api = Api::new(Arc::new(mock.clone()), Arc::new(XmlCodec::default()));
        AccountClient::new(api.resource())
    }

    #[tokio::test]
    async fn test_fetch_then_update() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/accounts/a1").return_status(
            200,
            "<account><account_code>a1</account_code><email>old@example.com</email><state>active</state></account>",
        );
        mock.expect(Verb::Put, "/accounts/a1").return_status(
            200,
            "<account><account_code>a1</account_code><email>new@example.com</email><state>active</state></account>",
        );

        let client = client(&mock);
        let mut account = client.fetch("a1").await.unwrap();
        account.set("email", "new@example.com").unwrap();
        let updated = client.update_account(&account).await.unwrap();

        assert_eq!(updated.get("email"), Some(&Value::from("new@example.com")));
        // `state` is read-only: kept from the response, never sent back.
        let body = mock.requests()[1].body.clone().unwrap();
        assert!(!body.contains("<state>"));
        assert!(body.contains("<account_code>a1</account_code>"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_requires_code() {
        let mock = MockTransport::new();
        let err = client(&mock)
            .create_account(fields! { "email" => "x@example.com" })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "account must include \"account_code\"");
        assert_eq!(mock.calls(), 0);
    }
}
