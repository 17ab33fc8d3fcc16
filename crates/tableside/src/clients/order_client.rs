//! # Order Client
//!
//! High-level API for the order lifecycle. Wraps a `ResourceClient<Order>`
//! and owns the catalog lookup that turns requested items into snapshots.
//! It never talks to the table registry; the session coordinator hands it
//! the epoch to stamp.

use crate::catalog::MenuCatalog;
use crate::model::{
    CustomerToken, LineItem, Order, OrderCreate, OrderId, OrderItemRequest, OrderStatus, OutletId,
    SessionEpoch, StaffId, TableId,
};
use crate::order_actor::{OrderAction, OrderError, OrderQuery};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    catalog: Arc<dyn MenuCatalog>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError<OrderError>) -> OrderError {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, catalog: Arc<dyn MenuCatalog>) -> Self {
        Self { inner, catalog }
    }

    /// Resolve requested items into write-once snapshots.
    ///
    /// The outlet's price override wins over the base price. Unknown or
    /// unavailable items and zero quantities are rejected before anything is
    /// stored.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn resolve_items(
        &self,
        outlet_id: &OutletId,
        items: &[OrderItemRequest],
    ) -> Result<Vec<LineItem>, OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let mut snapshots = Vec::with_capacity(items.len());
        for request in items {
            if request.quantity == 0 {
                return Err(OrderError::InvalidQuantity(request.catalog_ref.to_string()));
            }
            let item = self
                .catalog
                .lookup(outlet_id, &request.catalog_ref)
                .await
                .map_err(|e| OrderError::Catalog(e.to_string()))?
                .ok_or_else(|| OrderError::UnknownItem(request.catalog_ref.to_string()))?;
            if !item.available {
                return Err(OrderError::ItemUnavailable(request.catalog_ref.to_string()));
            }

            let (modifiers, modifier_total) = request.modifiers.iter().map(|m| m.describe()).fold(
                (Vec::new(), Decimal::ZERO),
                |(mut names, total), (name, adjustment)| {
                    names.push(name);
                    (names, total + adjustment)
                },
            );

            snapshots.push(LineItem {
                catalog_ref: request.catalog_ref.clone(),
                unit_price: item.effective_price(),
                name: item.name,
                quantity: request.quantity,
                modifiers,
                modifier_total,
            });
        }
        debug!(?snapshots, "Resolved items");
        Ok(snapshots)
    }

    /// Store a new order and return it as stored.
    #[instrument(skip(self, params), fields(outlet = %params.outlet_id, table = ?params.table_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        info!("Sending create_order to actor");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        id: OrderId,
        target: OrderStatus,
        staff: Option<StaffId>,
    ) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, OrderAction::Advance { target, staff })
            .await
            .map_err(Self::map_error)
    }

    /// Orders of one table session in placement order. With a token, only
    /// that customer's orders.
    pub async fn table_session_orders(
        &self,
        table_id: TableId,
        epoch: SessionEpoch,
        token: Option<CustomerToken>,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(OrderQuery::TableSession {
                table_id,
                epoch,
                token,
            })
            .await?;
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    /// An outlet's orders, newest first.
    pub async fn outlet_orders(&self, outlet_id: OutletId, open_only: bool) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(OrderQuery::Outlet {
                outlet_id,
                open_only,
            })
            .await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }
}
