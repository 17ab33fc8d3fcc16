//! [`ActorEntity`] implementation for [`Order`].
//!
//! Orders are created once from resolved snapshots and afterwards only move
//! through the status chain. There is no update payload at all, so line
//! items cannot change after creation.

use super::actions::{OrderAction, OrderQuery};
use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::token::TokenIssuer;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Query = OrderQuery;
    type Context = ();
    type Error = OrderError;

    /// Starts in `placed` with the total computed from the snapshots.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::InvalidQuantity(item.catalog_ref.to_string()));
        }
        let total = params
            .items
            .iter()
            .map(|item| item.line_total())
            .sum::<Decimal>();
        let now = Utc::now();

        Ok(Self {
            id,
            outlet_id: params.outlet_id,
            table_id: params.table_id,
            session_epoch: params.session_epoch,
            items: params.items,
            total,
            status: OrderStatus::Placed,
            customer_token: params.customer_token,
            notes: params.notes.filter(|n| !n.trim().is_empty()),
            taken_by: params.taken_by,
            prepared_by: None,
            delivered_by: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        match query {
            OrderQuery::TableSession {
                table_id,
                epoch,
                token,
            } => {
                self.in_session(*table_id, *epoch)
                    && token
                        .as_ref()
                        .map_or(true, |t| TokenIssuer::matches(t, &self.customer_token))
            }
            OrderQuery::Outlet {
                outlet_id,
                open_only,
            } => &self.outlet_id == outlet_id && (!open_only || self.is_open()),
        }
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), OrderError> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), OrderError> {
        Err(OrderError::Undeletable(self.id.to_string()))
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, OrderError> {
        match action {
            OrderAction::Advance { target, staff } => {
                if !self.can_advance_to(target) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: target,
                    });
                }
                match target {
                    OrderStatus::Cooking | OrderStatus::Ready => {
                        self.prepared_by = staff.or(self.prepared_by.take());
                    }
                    OrderStatus::OutForDelivery | OrderStatus::Delivered => {
                        self.delivered_by = staff.or(self.delivered_by.take());
                    }
                    OrderStatus::Placed | OrderStatus::Cancelled => {}
                }
                self.status = target;
                self.updated_at = Utc::now();
                Ok(self.clone())
            }
        }
    }
}
