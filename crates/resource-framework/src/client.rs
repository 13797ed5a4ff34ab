//! # Generic Client
//!
//! [`ResourceClient<K>`] implements every verb once for all resource kinds. Each
//! operation follows the same pipeline:
//!
//! 1. run the kind's pre-condition hook (writes only), before any I/O;
//! 2. serialize the instance and encode it with the codec;
//! 3. send one request through the transport;
//! 4. classify the outcome with [`normalize`];
//! 5. decode the body and inflate a fresh copy of the instance.
//!
//! Operations borrow the caller's [`Resource`] and return a new, synced one. A failed
//! operation therefore leaves the caller's value exactly as it was.

use crate::codec::{MarkupCodec, Payload, XmlCodec};
use crate::config::{ClientConfig, ConfigError};
use crate::error::{ResourceError, Result};
use crate::kind::{ResourceKind, WriteAction};
use crate::normalize::normalize;
use crate::request::{AcceptedStatus, ApiRequest, Verb};
use crate::resource::Resource;
use crate::transport::{HttpTransport, Transport};
use crate::value::{Fields, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Transport and codec shared by the clients of every resource kind.
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn MarkupCodec>,
}

impl Api {
    pub fn new(transport: Arc<dyn Transport>, codec: Arc<dyn MarkupCodec>) -> Self {
        Self { transport, codec }
    }

    /// HTTP transport and XML codec built from `config`.
    pub fn from_config(config: &ClientConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let transport = HttpTransport::from_config(config)?;
        let codec = XmlCodec::new(config.codec).map_err(|e| ConfigError::Invalid {
            key: "codec",
            message: e.to_string(),
        })?;
        Ok(Self::new(Arc::new(transport), Arc::new(codec)))
    }

    /// A typed client for resource kind `K`.
    pub fn resource<K: ResourceKind>(&self) -> ResourceClient<K> {
        ResourceClient {
            api: self.clone(),
            _kind: PhantomData,
        }
    }
}

/// Typed client for one resource kind. Cheap to clone.
pub struct ResourceClient<K: ResourceKind> {
    api: Api,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> ResourceClient<K> {
    pub fn new(api: Api) -> Self {
        api.resource()
    }

    /// An unsaved instance of this kind built from `options`.
    pub fn build(&self, options: Fields) -> Resource {
        Resource::construct(K::descriptor(), options)
    }

    /// `POST /{plural}` with the filtered options; accepts 200, 201 and 204.
    #[instrument(skip(self, options), fields(resource = K::descriptor().singular()))]
    pub async fn create(&self, options: Fields) -> Result<Resource> {
        K::validate(WriteAction::Create, &options)?;
        let resource = self.build(options);
        let body = self.encode(&resource)?;
        let path = K::descriptor().collection_path();
        self.perform(&resource, Verb::Post, path, Some(body), AcceptedStatus::CREATE)
            .await
    }

    /// `POST /{plural}/{sub_path}`: a create-shaped call routed to a sibling endpoint,
    /// such as a preview that does not persist anything.
    #[instrument(skip(self, options), fields(resource = K::descriptor().singular()))]
    pub async fn create_at(
        &self,
        action: WriteAction,
        sub_path: &str,
        options: Fields,
    ) -> Result<Resource> {
        K::validate(action, &options)?;
        let resource = self.build(options);
        let body = self.encode(&resource)?;
        let path = format!("{}/{}", K::descriptor().collection_path(), sub_path);
        self.perform(&resource, Verb::Post, path, Some(body), AcceptedStatus::CREATE)
            .await
    }

    /// `GET /{plural}/{id}`.
    #[instrument(skip(self), fields(resource = K::descriptor().singular()))]
    pub async fn fetch(&self, id: &str) -> Result<Resource> {
        if id.is_empty() {
            return Err(ResourceError::validation(format!(
                "{} id must not be empty",
                K::descriptor().singular()
            )));
        }
        let resource = Resource::empty(K::descriptor());
        let path = K::descriptor().member_path(id);
        self.perform(&resource, Verb::Get, path, None, AcceptedStatus::FETCH)
            .await
    }

    /// `PUT /{plural}/{id}` with the instance's declared properties.
    #[instrument(skip(self, resource), fields(resource = K::descriptor().singular()))]
    pub async fn update(&self, resource: &Resource) -> Result<Resource> {
        let id = Self::require_id(resource)?;
        K::validate(WriteAction::Update, resource.fields())?;
        let body = self.encode(resource)?;
        let path = K::descriptor().member_path(id);
        self.perform(resource, Verb::Put, path, Some(body), AcceptedStatus::UPDATE)
            .await
    }

    /// `DELETE /{plural}/{id}`. Only the remote resource is affected.
    #[instrument(skip(self, resource), fields(resource = K::descriptor().singular()))]
    pub async fn delete(&self, resource: &Resource) -> Result<()> {
        let id = Self::require_id(resource)?;
        let path = K::descriptor().member_path(id);
        self.exchange(
            ApiRequest::new(Verb::Delete, path, None),
            AcceptedStatus::DELETE,
        )
        .await?;
        info!(%id, "Deleted");
        Ok(())
    }

    /// `GET /{plural}?{filters}`; every element of the collection becomes a synced instance.
    #[instrument(skip(self), fields(resource = K::descriptor().singular()))]
    pub async fn list(&self, filters: &[(&str, &str)]) -> Result<Vec<Resource>> {
        let descriptor = K::descriptor();
        let mut path = descriptor.collection_path();
        if !filters.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(filters)
                .finish();
            path = format!("{path}?{query}");
        }

        let payload = self
            .exchange(ApiRequest::new(Verb::Get, path, None), AcceptedStatus::LIST)
            .await?;
        let items = match payload.map(|p| p.body) {
            Some(Value::List(items)) => items,
            Some(Value::Map(mut body)) => match body.shift_remove(descriptor.singular()) {
                Some(Value::List(items)) => items,
                Some(item) => vec![item],
                None => Vec::new(),
            },
            _ => Vec::new(),
        };

        let resources: Vec<Resource> = items
            .into_iter()
            .map(|item| {
                Resource::empty(descriptor).inflate(Payload::new(descriptor.singular(), item))
            })
            .collect();
        info!(count = resources.len(), "Listed");
        Ok(resources)
    }

    /// Sends one request and inflates a copy of `resource` from the response.
    ///
    /// This is the routine every verb shares. `resource` itself is never modified.
    pub async fn perform(
        &self,
        resource: &Resource,
        verb: Verb,
        path: String,
        body: Option<String>,
        accepted: AcceptedStatus,
    ) -> Result<Resource> {
        let singular = K::descriptor().singular();
        let payload = self
            .exchange(ApiRequest::new(verb, path, body), accepted)
            .await?
            .unwrap_or_else(|| Payload::new(singular, Value::Empty));

        if payload.root != singular {
            debug!(root = %payload.root, expected = singular, "Unexpected root element");
        }
        let synced = resource.clone().inflate(payload);
        info!(%verb, id = synced.id().unwrap_or("-"), "Synced");
        Ok(synced)
    }

    /// Transport call plus normalization and decoding. `None` means an empty body.
    async fn exchange(
        &self,
        request: ApiRequest,
        accepted: AcceptedStatus,
    ) -> Result<Option<Payload>> {
        let verb = request.verb;
        let path = request.path.clone();
        debug!(%verb, %path, body = ?request.body, "Dispatching");

        let outcome = self.api.transport.send(request).await;
        let response = match (normalize(outcome.as_ref(), accepted, self.api.codec.as_ref()), outcome) {
            (Some(err), _) => {
                warn!(%verb, %path, kind = %err.kind(), status = ?err.status(), error = %err, "Request failed");
                return Err(err);
            }
            (None, Ok(response)) => response,
            (None, Err(e)) => return Err(ResourceError::Connection(e.to_string())),
        };

        if response.body.trim().is_empty() {
            return Ok(None);
        }
        self.api
            .codec
            .decode(&response.body)
            .map(Some)
            .map_err(|e| {
                warn!(%verb, %path, status = response.status, error = %e, "Undecodable response");
                ResourceError::Decode {
                    status: response.status,
                    message: e.to_string(),
                }
            })
    }

    fn encode(&self, resource: &Resource) -> Result<String> {
        self.api
            .codec
            .encode(&resource.serialize())
            .map_err(|e| {
                ResourceError::validation(format!(
                    "cannot encode {}: {e}",
                    resource.descriptor().singular()
                ))
            })
    }

    fn require_id(resource: &Resource) -> Result<&str> {
        resource.id().ok_or_else(|| {
            let d = resource.descriptor();
            ResourceError::validation(format!(
                "{} has no {}; create or fetch it first",
                d.singular(),
                d.id_field()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ResourceDescriptor;
    use crate::error::ErrorKind;
    use crate::fields;
    use crate::mock::MockTransport;
    use crate::resource::LifecycleState;

    static WIDGET: ResourceDescriptor =
        ResourceDescriptor::new(&["name", "size"], "code", "widget", "widgets", false);

    struct Widget;

    impl ResourceKind for Widget {
        fn descriptor() -> &'static ResourceDescriptor {
            &WIDGET
        }

        fn validate(action: WriteAction, options: &Fields) -> Result<()> {
            crate::kind::require(options, "name", || format!("{action} needs a name"))
        }
    }

    fn client(mock: &MockTransport) -> ResourceClient<Widget> {
        Api::new(Arc::new(mock.clone()), Arc::new(XmlCodec::default())).resource()
    }

    #[tokio::test]
    async fn test_create_inflates_response() {
        let mock = MockTransport::new();
        mock.expect(Verb::Post, "/widgets").return_status(
            201,
            "<widget><code>w1</code><name>gear</name><created_at>now</created_at></widget>",
        );

        let widget = client(&mock)
            .create(fields! { "name" => "gear", "color" => "ignored" })
            .await
            .unwrap();

        assert_eq!(widget.id(), Some("w1"));
        assert_eq!(widget.state(), LifecycleState::Synced);
        assert_eq!(widget.get("created_at"), Some(&Value::from("now")));

        let sent = mock.requests();
        let body = sent[0].body.as_deref().unwrap();
        assert!(body.ends_with("<widget><name>gear</name></widget>"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_validation_never_reaches_transport() {
        let mock = MockTransport::new();
        let err = client(&mock).create(fields! { "size" => 3 }).await.unwrap_err();
        assert_eq!(err, ResourceError::Validation("create needs a name".into()));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_update_delete() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/widgets/w1")
            .return_status(200, "<widget><code>w1</code><name>gear</name></widget>");
        mock.expect(Verb::Put, "/widgets/w1")
            .return_status(200, "<widget><code>w1</code><name>cog</name><size>2</size></widget>");
        mock.expect(Verb::Delete, "/widgets/w1").return_status(204, "");

        let client = client(&mock);
        let mut widget = client.fetch("w1").await.unwrap();
        widget.set("name", "cog").unwrap();
        widget.set("size", 2).unwrap();

        let updated = client.update(&widget).await.unwrap();
        assert_eq!(updated.get("name"), Some(&Value::from("cog")));
        let sent = mock.requests()[1].body.clone().unwrap();
        assert!(sent.ends_with("<widget><name>cog</name><size>2</size></widget>"));

        client.delete(&updated).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_fetch_escapes_identity_in_path() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/widgets/a%3Fb%2Fc")
            .return_status(200, "<widget><code>a?b/c</code></widget>");

        let widget = client(&mock).fetch("a?b/c").await.unwrap();
        assert_eq!(widget.id(), Some("a?b/c"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_without_identity_is_validation_error() {
        let mock = MockTransport::new();
        let client = client(&mock);
        let unsaved = client.build(fields! { "name" => "gear" });
        let err = client.update(&unsaved).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(client.delete(&unsaved).await.unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/widgets?state=active&per_page=2")
            .return_status(
                200,
                r#"<widgets type="array">
                    <widget><code>a</code></widget>
                    <widget><code>b</code></widget>
                </widgets>"#,
            );

        let widgets = client(&mock)
            .list(&[("state", "active"), ("per_page", "2")])
            .await
            .unwrap();
        let ids: Vec<_> = widgets.iter().filter_map(Resource::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(widgets.iter().all(|w| w.state() == LifecycleState::Synced));
    }

    #[tokio::test]
    async fn test_list_single_and_empty() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/widgets")
            .return_status(200, "<widgets><widget><code>only</code></widget></widgets>");
        mock.expect(Verb::Get, "/widgets")
            .return_status(200, r#"<widgets type="array"/>"#);

        let client = client(&mock);
        assert_eq!(client.list(&[]).await.unwrap().len(), 1);
        assert!(client.list(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_status_with_bad_body_is_decode_error() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/widgets/w1")
            .return_status(200, "<widget><code>w1</widget>");

        let err = client(&mock).fetch("w1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_caller_untouched() {
        let mock = MockTransport::new();
        mock.expect(Verb::Get, "/widgets/w1")
            .return_status(200, "<widget><code>w1</code><name>gear</name></widget>");
        mock.expect(Verb::Put, "/widgets/w1").return_status(
            422,
            r#"<errors><error field="widget.name" symbol="taken">is taken</error></errors>"#,
        );

        let client = client(&mock);
        let mut widget = client.fetch("w1").await.unwrap();
        widget.set("name", "dup").unwrap();
        let before = widget.clone();

        let err = client.update(&widget).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.message(), "widget.name is taken");
        assert_eq!(widget, before);
    }
}
