//! # ActorClient Trait
//!
//! Shared plumbing for domain clients that wrap a [`ResourceClient`].
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by domain clients (e.g. a table or order client) to inherit
/// `get` and `list` with their own error type.
///
/// The implementor decides how a [`FrameworkError`] becomes a domain error;
/// typically `Entity(e)` is unwrapped back to `e` and transport failures
/// become a communication variant.
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32 }
/// #[derive(Debug)] struct NoteCreate;
/// #[derive(Debug, thiserror::Error)]
/// enum NoteError {
///     #[error("note not found: {0}")] NotFound(String),
///     #[error("{0}")] Other(String),
/// }
/// impl From<String> for NoteError { fn from(s: String) -> Self { NoteError::Other(s) } }
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32; type Create = NoteCreate; type Update = (); type Action = ();
///     type ActionResult = (); type Query = (); type Context = (); type Error = NoteError;
///     fn from_create_params(id: u32, _: NoteCreate) -> Result<Self, NoteError> { Ok(Self { id }) }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// struct NoteClient { inner: ResourceClient<Note> }
///
/// #[async_trait]
/// impl ActorClient<Note> for NoteClient {
///     type Error = NoteError;
///     fn inner(&self) -> &ResourceClient<Note> { &self.inner }
///     fn map_error(e: FrameworkError<NoteError>) -> NoteError {
///         match e {
///             FrameworkError::Entity(e) => e,
///             FrameworkError::NotFound(id) => NoteError::NotFound(id),
///             other => NoteError::Other(other.to_string()),
///         }
///     }
/// }
///
/// async fn usage(client: NoteClient) {
///     let _ = client.get(1).await;
///     let _ = client.list(()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError<T::Error>) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `query`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: T::Query) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query).await.map_err(Self::map_error)
    }
}
