//! # ResourceApi Trait
//!
//! Gives resource-specific clients default `fetch`, `list` and `delete` methods on top of
//! a generic [`ResourceClient`].
use crate::{Resource, ResourceClient, ResourceError, ResourceKind};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the read and delete operations.
///
/// # Example
///
/// ```rust
/// use resource_framework::{ResourceApi, ResourceClient, ResourceDescriptor, ResourceKind};
///
/// static NOTE: ResourceDescriptor =
///     ResourceDescriptor::new(&["body"], "id", "note", "notes", false);
/// struct Note;
/// impl ResourceKind for Note {
///     fn descriptor() -> &'static ResourceDescriptor { &NOTE }
/// }
///
/// struct NoteClient {
///     inner: ResourceClient<Note>,
/// }
///
/// impl ResourceApi<Note> for NoteClient {
///     fn inner(&self) -> &ResourceClient<Note> {
///         &self.inner
///     }
/// }
///
/// async fn usage(client: NoteClient) {
///     // fetch(), list() and delete() are provided automatically.
///     if let Ok(note) = client.fetch("n1").await {
///         let _ = client.delete(&note).await;
///     }
///     let _ = client.list(&[("per_page", "50")]).await;
/// }
/// ```
#[async_trait]
pub trait ResourceApi<K: ResourceKind>: Send + Sync {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<K>;

    /// Fetch one instance by identity.
    async fn fetch(&self, id: &str) -> Result<Resource, ResourceError> {
        tracing::debug!(%id, "Fetch");
        self.inner().fetch(id).await
    }

    /// List instances matching `filters`.
    async fn list(&self, filters: &[(&str, &str)]) -> Result<Vec<Resource>, ResourceError> {
        tracing::debug!(?filters, "List");
        self.inner().list(filters).await
    }

    /// Delete the remote counterpart of `resource`.
    async fn delete(&self, resource: &Resource) -> Result<(), ResourceError> {
        tracing::debug!(id = ?resource.id(), "Delete");
        self.inner().delete(resource).await
    }
}
