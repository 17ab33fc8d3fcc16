//! # Generic Messages
//!
//! The request envelope exchanged between [`ResourceClient`](crate::ResourceClient)
//! and [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot reply channel carrying either the result or a [`FrameworkError`].
pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// A request addressed to the actor owning entities of type `T`.
///
/// The variants are the CRUD verbs plus `List` (filtered scan over the store)
/// and `Action` (entity-specific operations such as claiming a table). Every
/// payload type comes from the [`ActorEntity`] associated types, so a table
/// action can never be sent to the order actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        query: T::Query,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}
