//! Request and response shapes accepted by the session coordinator.

use crate::model::{CustomerToken, Order, OrderItemRequest, OutletId, StaffId, Table, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub outlet_id: OutletId,
    /// `None` for takeaway and delivery orders.
    #[serde(default)]
    pub table_id: Option<TableId>,
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub notes: Option<String>,
    /// The token a returning customer got with an earlier order.
    #[serde(default)]
    pub customer_token: Option<CustomerToken>,
}

impl PlaceOrderRequest {
    pub fn at_table(outlet_id: impl Into<OutletId>, table_id: TableId, items: Vec<OrderItemRequest>) -> Self {
        Self {
            outlet_id: outlet_id.into(),
            table_id: Some(table_id),
            items,
            notes: None,
            customer_token: None,
        }
    }

    pub fn with_token(mut self, token: CustomerToken) -> Self {
        self.customer_token = Some(token);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: Order,
    /// Keep this to place further orders and to list them later.
    pub customer_token: CustomerToken,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTableRequest {
    pub table_id: TableId,
    pub guest_name: String,
    pub party_size: u32,
    #[serde(default)]
    pub reservation_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Waiter,
    Kitchen,
    Manager,
}

/// An authenticated staff member. Authentication happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffContext {
    pub id: StaffId,
    pub role: StaffRole,
}

impl StaffContext {
    pub fn new(id: impl Into<StaffId>, role: StaffRole) -> Self {
        Self { id: id.into(), role }
    }
}

/// Who is asking to list a table's orders.
#[derive(Debug, Clone)]
pub enum Caller {
    Customer(Option<CustomerToken>),
    Staff(StaffContext),
}

/// A table as shown on the floor plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorTable {
    #[serde(flatten)]
    pub table: Table,
    /// Display only: the current session has a non-terminal order.
    pub has_open_order: bool,
}
