//! # Session Coordinator
//!
//! Every customer-facing placement or listing enters here. The coordinator
//! reads the lease from the table registry, checks the presented token and
//! only then asks the order lifecycle to act. Staff operations (advance,
//! release, reserve) skip the token checks but go through the same clients,
//! so both paths see one source of truth.
//!
//! ## Per-table critical section
//!
//! Placing an order is claim, conflict check, create, point the table at the
//! new order. The table actor makes each step atomic on its own; the
//! coordinator additionally holds a per-table `tokio::sync::Mutex` across the
//! whole sequence, and `release`/`reserve` take the same lock. Two customers
//! racing for one free table are therefore serialised: the first claims it
//! and the second finds a non-terminal order it holds no token for.
//!
//! ## Exclusivity
//!
//! Every order gets a freshly minted token. While the epoch has a
//! non-terminal order, a new order is only accepted with a token from that
//! session: the token of the table's active order or of any open order.
//! With no open order in the epoch, anyone may order and the new order joins
//! the same epoch.
//!
//! A placement that fails after it freshly claimed the table hands the claim
//! back, so the table ends up as it was.

mod requests;

pub use requests::*;

use crate::clients::{OrderClient, TableClient};
use crate::error::ServiceError;
use crate::events::{EventBus, FloorEvent, OutletEvents};
use crate::model::{
    CustomerToken, Order, OrderCreate, OrderId, OrderStatus, OutletId, Reservation, SessionEpoch, StaffId,
    Table, TableCreate, TableId, TableUpdate,
};
use crate::table_actor::Claim;
use crate::token::TokenIssuer;
use actor_framework::ActorClient;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

#[derive(Clone)]
pub struct SessionCoordinator {
    tables: TableClient,
    orders: OrderClient,
    events: EventBus,
    locks: Arc<DashMap<TableId, Arc<Mutex<()>>>>,
}

impl SessionCoordinator {
    pub fn new(tables: TableClient, orders: OrderClient, events: EventBus) -> Self {
        Self {
            tables,
            orders,
            events,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn subscribe(&self, outlet_id: OutletId) -> OutletEvents {
        self.events.subscribe(outlet_id)
    }

    fn table_lock(&self, table_id: TableId) -> Arc<Mutex<()>> {
        self.locks.entry(table_id).or_default().value().clone()
    }

    // =========================================================================
    // Customer-facing
    // =========================================================================

    /// Place an order, at a table or (without `table_id`) for takeaway.
    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<PlacedOrder, ServiceError> {
        self.place(request, None).await
    }

    /// Place an order on a customer's behalf; `staff` is recorded as `taken_by`.
    /// Token rules apply exactly as for the customer.
    pub async fn place_order_for(
        &self,
        request: PlaceOrderRequest,
        staff: &StaffContext,
    ) -> Result<PlacedOrder, ServiceError> {
        self.place(request, Some(staff.id.clone())).await
    }

    #[instrument(skip_all, fields(outlet = %request.outlet_id, table = ?request.table_id))]
    async fn place(&self, request: PlaceOrderRequest, taken_by: Option<StaffId>) -> Result<PlacedOrder, ServiceError> {
        // Resolve snapshots first so invalid input never touches the lease.
        let items = self.orders.resolve_items(&request.outlet_id, &request.items).await?;

        let Some(table_id) = request.table_id else {
            let customer_token = TokenIssuer::issue();
            let order = self
                .orders
                .create_order(OrderCreate {
                    outlet_id: request.outlet_id,
                    table_id: None,
                    session_epoch: None,
                    items,
                    notes: request.notes,
                    customer_token: customer_token.clone(),
                    taken_by,
                })
                .await?;
            info!(order_id = %order.id, "Takeaway order placed");
            self.publish_placed(&order);
            return Ok(PlacedOrder { order, customer_token });
        };

        let lock = self.table_lock(table_id);
        let _guard = lock.lock().await;

        let claim = self.tables.try_claim(table_id, request.outlet_id.clone()).await?;
        if claim.fresh {
            info!(%table_id, epoch = %claim.epoch, "Table claimed");
        }

        let customer_token = TokenIssuer::issue();
        let params = OrderCreate {
            outlet_id: request.outlet_id,
            table_id: Some(table_id),
            session_epoch: Some(claim.epoch),
            items,
            notes: request.notes,
            customer_token: customer_token.clone(),
            taken_by,
        };
        let order = match self
            .admit_and_create(table_id, claim, request.customer_token.as_ref(), params)
            .await
        {
            Ok(order) => order,
            Err(e) => {
                if claim.fresh {
                    self.undo_claim(table_id, claim.epoch).await;
                }
                return Err(e);
            }
        };

        if !self.tables.set_active_order(table_id, order.id, claim.epoch).await? {
            warn!(%table_id, order_id = %order.id, "Table epoch changed before the active order was set");
        }
        info!(%table_id, order_id = %order.id, epoch = %claim.epoch, "Order placed");
        self.publish_placed(&order);

        Ok(PlacedOrder { order, customer_token })
    }

    async fn admit_and_create(
        &self,
        table_id: TableId,
        claim: Claim,
        presented: Option<&CustomerToken>,
        params: OrderCreate,
    ) -> Result<Order, ServiceError> {
        self.check_session(table_id, claim, presented).await?;
        Ok(self.orders.create_order(params).await?)
    }

    /// `SessionConflict` unless the epoch is idle or `presented` belongs to
    /// the customer holding it.
    async fn check_session(
        &self,
        table_id: TableId,
        claim: Claim,
        presented: Option<&CustomerToken>,
    ) -> Result<(), ServiceError> {
        let session = self.orders.table_session_orders(table_id, claim.epoch, None).await?;
        let open = session.iter().filter(|o| o.is_open()).count();
        if open == 0 {
            return Ok(());
        }

        let admitted = presented.is_some_and(|token| {
            session
                .iter()
                .filter(|o| o.is_open() || Some(o.id) == claim.active_order_id)
                .any(|o| TokenIssuer::matches(token, &o.customer_token))
        });
        if admitted {
            return Ok(());
        }
        warn!(%table_id, open_orders = open, presented = presented.is_some(), "Session conflict");
        Err(ServiceError::table_occupied())
    }

    /// Hand back a claim whose order never got stored.
    async fn undo_claim(&self, table_id: TableId, epoch: SessionEpoch) {
        match self.tables.unclaim(table_id, epoch).await {
            Ok(true) => info!(%table_id, %epoch, "Claim undone after failed placement"),
            Ok(false) => warn!(%table_id, %epoch, "Table moved on, claim not undone"),
            Err(e) => error!(%table_id, error = %e, "Failed to undo claim"),
        }
    }

    /// Orders of the table's current session.
    ///
    /// Staff see all of them. Customers must present a token and see only
    /// their own; a token from an earlier session simply matches nothing.
    #[instrument(skip(self, caller))]
    pub async fn list_table_orders(&self, table_id: TableId, caller: &Caller) -> Result<Vec<Order>, ServiceError> {
        let token = match caller {
            Caller::Staff(_) => None,
            Caller::Customer(Some(token)) => Some(token.clone()),
            Caller::Customer(None) => {
                return Err(ServiceError::InvalidInput("A customer token is required".into()));
            }
        };
        let table = self.require_table(table_id).await?;
        Ok(self
            .orders
            .table_session_orders(table_id, table.session_epoch, token)
            .await?)
    }

    // =========================================================================
    // Staff-facing
    // =========================================================================

    /// Move an order along the status chain. Never touches the table lease.
    #[instrument(skip(self, staff), fields(staff = %staff.id))]
    pub async fn advance_status(
        &self,
        order_id: OrderId,
        target: OrderStatus,
        staff: &StaffContext,
    ) -> Result<Order, ServiceError> {
        let order = self.orders.advance(order_id, target, Some(staff.id.clone())).await?;
        info!(%order_id, status = %order.status, role = ?staff.role, "Order status advanced");
        self.events.publish(FloorEvent::OrderStatusChanged {
            outlet_id: order.outlet_id.clone(),
            order_id,
            status: order.status,
        });
        Ok(order)
    }

    /// Free the table and rotate its epoch. Orders are left as they are.
    #[instrument(skip(self, staff), fields(staff = %staff.id))]
    pub async fn release_table(&self, table_id: TableId, staff: &StaffContext) -> Result<Table, ServiceError> {
        let lock = self.table_lock(table_id);
        let _guard = lock.lock().await;

        let table = self.tables.release(table_id).await?;
        info!(%table_id, epoch = %table.session_epoch, "Table released");
        self.events.publish(FloorEvent::TableReleased {
            outlet_id: table.outlet_id.clone(),
            table_id,
            epoch: table.session_epoch,
        });
        Ok(table)
    }

    /// Pre-seat a table for a reservation or walk-in, without an order.
    #[instrument(skip(self, staff), fields(staff = %staff.id))]
    pub async fn reserve_table(
        &self,
        request: ReserveTableRequest,
        staff: &StaffContext,
    ) -> Result<Table, ServiceError> {
        let guest_name = request.guest_name.trim();
        if guest_name.is_empty() {
            return Err(ServiceError::InvalidInput("Guest name is required".into()));
        }
        if request.party_size == 0 {
            return Err(ServiceError::InvalidInput("Party size must be at least 1".into()));
        }
        let Some(reservation_time) = request.reservation_time else {
            return Err(ServiceError::InvalidInput("Reservation time is required".into()));
        };

        let lock = self.table_lock(request.table_id);
        let _guard = lock.lock().await;

        let table = self
            .tables
            .reserve(
                request.table_id,
                Reservation {
                    guest_name: guest_name.to_string(),
                    party_size: request.party_size,
                    reservation_time,
                },
            )
            .await?;
        info!(table_id = %table.id, epoch = %table.session_epoch, "Table reserved");
        self.events.publish(FloorEvent::TableReserved {
            outlet_id: table.outlet_id.clone(),
            table_id: table.id,
        });
        Ok(table)
    }

    // =========================================================================
    // Table management and dashboards
    // =========================================================================

    #[instrument(skip(self, staff), fields(staff = %staff.id))]
    pub async fn create_table(&self, params: TableCreate, staff: &StaffContext) -> Result<Table, ServiceError> {
        let id = self.tables.create_table(params).await?;
        self.require_table(id).await
    }

    #[instrument(skip(self, staff), fields(staff = %staff.id))]
    pub async fn update_table(
        &self,
        table_id: TableId,
        update: TableUpdate,
        staff: &StaffContext,
    ) -> Result<Table, ServiceError> {
        Ok(self.tables.update_table(table_id, update).await?)
    }

    /// Only tables that are not leased can be deleted.
    #[instrument(skip(self, staff), fields(staff = %staff.id))]
    pub async fn delete_table(&self, table_id: TableId, staff: &StaffContext) -> Result<(), ServiceError> {
        let lock = self.table_lock(table_id);
        let _guard = lock.lock().await;

        self.tables.delete_table(table_id).await?;
        self.locks.remove(&table_id);
        Ok(())
    }

    pub async fn get_table(&self, table_id: TableId) -> Result<Table, ServiceError> {
        self.require_table(table_id).await
    }

    /// An outlet's tables with a display flag for open orders in their
    /// current session. The flag is derived and never feeds back into `leased`.
    #[instrument(skip(self, staff), fields(staff = %staff.id))]
    pub async fn floor_view(
        &self,
        outlet_id: OutletId,
        staff: &StaffContext,
    ) -> Result<Vec<FloorTable>, ServiceError> {
        let tables = self.tables.tables_for_outlet(outlet_id.clone()).await?;
        let open_sessions: HashSet<(TableId, SessionEpoch)> = self
            .orders
            .outlet_orders(outlet_id, true)
            .await?
            .into_iter()
            .filter_map(|o| Some((o.table_id?, o.session_epoch?)))
            .collect();

        Ok(tables
            .into_iter()
            .map(|table| FloorTable {
                has_open_order: open_sessions.contains(&(table.id, table.session_epoch)),
                table,
            })
            .collect())
    }

    /// Kitchen and waiter board: an outlet's orders, newest first.
    pub async fn order_board(&self, outlet_id: OutletId, open_only: bool) -> Result<Vec<Order>, ServiceError> {
        Ok(self.orders.outlet_orders(outlet_id, open_only).await?)
    }

    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, ServiceError> {
        self.orders
            .get(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order not found: {order_id}")))
    }

    async fn require_table(&self, table_id: TableId) -> Result<Table, ServiceError> {
        self.tables
            .get(table_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Table not found: {table_id}")))
    }

    fn publish_placed(&self, order: &Order) {
        self.events.publish(FloorEvent::OrderPlaced {
            outlet_id: order.outlet_id.clone(),
            order_id: order.id,
            table_id: order.table_id,
        });
    }
}
