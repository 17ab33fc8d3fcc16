//! # Actor Framework
//!
//! Building blocks for type-safe resource actors on Tokio. Each resource type
//! (a dining table, an order) is owned by exactly one [`ResourceActor`], which
//! keeps the entities in memory and applies requests one at a time. Callers
//! talk to it through a cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): domain state, payload types and the hooks
//!    that validate and apply changes.
//! 2. **Runtime** ([`ResourceActor`]): the store and the message loop.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests and
//!    typed replies.
//!
//! ## Sequential Processing
//!
//! The run loop is the only code that touches an actor's store. A hook that
//! reads a field, decides and writes it back is therefore atomic with respect
//! to every other request to the same actor. This is what lets a table lease be
//! claimed with a plain `if !self.leased` check:
//!
//! ```rust
//! use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Booth { id: u32, taken: bool }
//!
//! #[derive(Debug)] struct BoothCreate;
//! #[derive(Debug)] enum BoothAction { Take }
//! #[derive(Debug, PartialEq, thiserror::Error)]
//! enum BoothError { #[error("booth already taken")] Taken }
//!
//! #[async_trait]
//! impl ActorEntity for Booth {
//!     type Id = u32;
//!     type Create = BoothCreate;
//!     type Update = ();
//!     type Action = BoothAction;
//!     type ActionResult = ();
//!     type Query = ();
//!     type Context = ();
//!     type Error = BoothError;
//!
//!     fn from_create_params(id: u32, _: BoothCreate) -> Result<Self, BoothError> {
//!         Ok(Self { id, taken: false })
//!     }
//!
//!     fn matches(&self, _: &()) -> bool { true }
//!
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), BoothError> { Ok(()) }
//!
//!     async fn handle_action(&mut self, action: BoothAction, _: &()) -> Result<(), BoothError> {
//!         match action {
//!             BoothAction::Take if self.taken => Err(BoothError::Taken),
//!             BoothAction::Take => {
//!                 self.taken = true;
//!                 Ok(())
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Booth>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(BoothCreate).await.unwrap();
//!     assert!(client.perform_action(id, BoothAction::Take).await.is_ok());
//!     assert_eq!(
//!         client.perform_action(id, BoothAction::Take).await,
//!         Err(FrameworkError::Entity(BoothError::Taken))
//!     );
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the
//! constructor. All actors can be created first and wired together afterwards,
//! so an order actor can receive the table client in its `Context` without a
//! construction-order cycle.
//!
//! ## Errors
//!
//! Every reply is a `Result<_, FrameworkError<E>>` where `E` is the entity's
//! own error enum. Transport failures (`ActorClosed`, `ActorDropped`) and store
//! failures (`NotFound`, `Conflict`) are separated from domain rejections
//! (`Entity(E)`), which domain clients usually unwrap in
//! [`ActorClient::map_error`].
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`mock::MockClient`] and
//! channel-level helpers for testing client logic without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-exports
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
