//! Error types for the Order actor.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Invalid quantity for {0}: must be at least 1")]
    InvalidQuantity(String),

    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    #[error("Menu item not available at this outlet: {0}")]
    ItemUnavailable(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Orders are kept for the record and only ever reach a terminal status.
    #[error("Order {0} cannot be deleted")]
    Undeletable(String),

    #[error("Menu catalog error: {0}")]
    Catalog(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
