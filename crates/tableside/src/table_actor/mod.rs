//! Table lease registry: table records and their occupancy actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TableClient;
use crate::model::Table;
use actor_framework::ResourceActor;

/// Creates a new Table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Table>, TableClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = TableClient::new(generic_client);

    (actor, client)
}
