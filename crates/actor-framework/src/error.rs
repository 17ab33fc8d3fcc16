//! # Framework Errors
//!
//! Errors raised by the actor runtime itself, plus a wrapper that carries the
//! entity's own error type back to the caller.

/// Errors that can occur when talking to a [`ResourceActor`](crate::ResourceActor).
///
/// `E` is the entity's error type ([`ActorEntity::Error`](crate::ActorEntity::Error)).
/// It travels through the response channel unchanged, so a domain client can
/// still match on e.g. `OrderError::InvalidTransition` after the round trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Another entity already holds the same [`unique_key`](crate::ActorEntity::unique_key).
    #[error("Unique key already taken: {0}")]
    Conflict(String),
    /// The actor has handed out every id its counter can represent.
    #[error("Id space exhausted")]
    IdsExhausted,
    #[error("Entity error: {0}")]
    Entity(E),
}

impl<E> FrameworkError<E> {
    /// True when the failure came from the transport, not from the entity.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
