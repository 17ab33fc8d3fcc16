//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the store for one entity type and drains its request
//! channel on a single Tokio task. Whatever happens inside one request, hooks
//! and awaits included, is never interleaved with another request to the same
//! actor.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of a resource actor.
///
/// Holds the `HashMap` store and the receiving end of the channel. Because the
/// run loop is the only code that touches `store`, no lock is needed, and any
/// read-check-write done inside a hook is atomic with respect to every other
/// request.
///
/// Updates and actions operate on a clone of the entity and are committed only
/// on success, so a failed request leaves the stored entity exactly as it was.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, hits: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] enum CounterAction { Hit }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32; type Create = CounterCreate; type Update = ();
///     type Action = CounterAction; type ActionResult = u32; type Query = ();
///     type Context = (); type Error = CounterError;
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, CounterError> {
///         Ok(Self { id, hits: 0 })
///     }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), CounterError> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, CounterError> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(CounterCreate).await.unwrap();
///     assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and a client connected to it.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait for
    /// space when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every hook, which lets dependencies be wired in
    /// after all actors have been constructed.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = match self.allocate_id() {
                        Some(id) => self.create(id, params, &context).await,
                        None => Err(FrameworkError::IdsExhausted),
                    };
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&query))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.act(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Next id, or `None` once the counter would overflow.
    fn allocate_id(&mut self) -> Option<T::Id> {
        let next = self.next_id.checked_add(1)?;
        let id = T::Id::from(self.next_id);
        self.next_id = next;
        Some(id)
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError<T::Error>> {
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create(context)
            .await
            .map_err(FrameworkError::Entity)?;
        self.check_unique(None, &item)?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError<T::Error>> {
        let mut draft = self.checkout(id)?;
        draft
            .on_update(update, context)
            .await
            .map_err(FrameworkError::Entity)?;
        self.check_unique(Some(id), &draft)?;
        self.store.insert(id.clone(), draft.clone());
        Ok(draft)
    }

    async fn delete(
        &mut self,
        id: &T::Id,
        context: &T::Context,
    ) -> Result<(), FrameworkError<T::Error>> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(context)
            .await
            .map_err(FrameworkError::Entity)?;
        self.store.remove(id);
        Ok(())
    }

    async fn act(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let mut draft = self.checkout(id)?;
        let result = draft
            .handle_action(action, context)
            .await
            .map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), draft);
        Ok(result)
    }

    fn checkout(&self, id: &T::Id) -> Result<T, FrameworkError<T::Error>> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    fn check_unique(&self, own_id: Option<&T::Id>, item: &T) -> Result<(), FrameworkError<T::Error>> {
        let Some(key) = item.unique_key() else {
            return Ok(());
        };
        let taken = self
            .store
            .iter()
            .filter(|(id, _)| Some(*id) != own_id)
            .any(|(_, other)| other.unique_key().as_deref() == Some(key.as_str()));
        if taken {
            Err(FrameworkError::Conflict(key))
        } else {
            Ok(())
        }
    }
}
