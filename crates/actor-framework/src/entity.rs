//! # ActorEntity Trait
//!
//! The contract every resource must satisfy to be owned by a
//! [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin down the payload of each request kind, so the compiler
//! rejects a `TableCreate` sent to the order actor. Lifecycle hooks are async
//! and receive the actor's injected `Context`, which is how an entity reaches
//! external collaborators without holding them in its own state.
//!
//! `on_create` and `on_delete` have no-op defaults, as does `unique_key`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Identifier, generated by the actor from a sequential `u32`.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a new instance.
    type Create: Send + Sync + Debug;

    /// Payload for updating an existing instance.
    type Update: Send + Sync + Debug;

    /// Entity-specific operations beyond CRUD.
    type Action: Send + Sync + Debug;

    /// Result of an [`Action`](ActorEntity::Action).
    type ActionResult: Send + Sync + Debug;

    /// Filter used by `List` requests, see [`ActorEntity::matches`].
    type Query: Send + Sync + Debug;

    /// Dependencies injected into every hook by `ResourceActor::run`.
    /// Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per entity; it reaches the caller as
    /// [`FrameworkError::Entity`](crate::FrameworkError::Entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its id and creation payload. Runs before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity belongs in the result of a `List` request.
    fn matches(&self, query: &Self::Query) -> bool;

    /// A key that must be unique across the store (e.g. a label within an outlet).
    ///
    /// The actor rejects creates and updates that would produce a duplicate
    /// with [`FrameworkError::Conflict`](crate::FrameworkError::Conflict).
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after `from_create_params`, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update. Runs on a copy; the store only sees the result if this returns `Ok`.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the entity is removed. Returning an error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle an entity-specific action. Same copy-then-commit rule as `on_update`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
