//! Order lifecycle: snapshot creation and the status state machine.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::catalog::MenuCatalog;
use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;
use std::sync::Arc;

/// Creates a new Order actor and its client.
///
/// The client resolves line items through `catalog` before anything reaches
/// the actor, so the actor itself only ever sees finished snapshots.
pub fn new(buffer_size: usize, catalog: Arc<dyn MenuCatalog>) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = OrderClient::new(generic_client, catalog);

    (actor, client)
}
