//! A physical dining table and its occupancy state.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor`](actor_framework::ResourceActor); see
//! [`crate::table_actor`] for the lease actions and their rules.

use crate::model::{OrderId, OutletId, SessionEpoch, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    #[default]
    Rect,
    Round,
    Square,
}

/// Guest details recorded when staff pre-seat a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub guest_name: String,
    pub party_size: u32,
    pub reservation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub outlet_id: OutletId,
    pub label: String,
    pub capacity: u32,
    pub floor: u32,
    pub shape: TableShape,
    /// Authoritative occupancy flag. Only reserve, release and the first
    /// order of a session change it.
    pub leased: bool,
    pub session_epoch: SessionEpoch,
    pub active_order_id: Option<OrderId>,
    pub reservation: Option<Reservation>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreate {
    pub outlet_id: OutletId,
    pub label: String,
    pub capacity: u32,
    #[serde(default)]
    pub floor: Option<u32>,
    #[serde(default)]
    pub shape: Option<TableShape>,
}

/// Payload for updating the descriptive fields of a table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    pub label: Option<String>,
    pub capacity: Option<u32>,
    pub floor: Option<u32>,
    pub shape: Option<TableShape>,
}

/// Filter for listing tables.
#[derive(Debug, Clone)]
pub enum TableQuery {
    Outlet(OutletId),
}

impl Table {
    /// A new, unleased table with its first epoch already minted.
    pub fn new(id: TableId, outlet_id: OutletId, label: String, capacity: u32) -> Self {
        Self {
            id,
            outlet_id,
            label,
            capacity,
            floor: 1,
            shape: TableShape::default(),
            leased: false,
            session_epoch: SessionEpoch::mint(),
            active_order_id: None,
            reservation: None,
            created_at: Utc::now(),
        }
    }
}
