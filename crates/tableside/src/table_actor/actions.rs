//! Lease actions for the Table actor.
//!
//! These are the only operations that touch `leased`, `session_epoch` and
//! `active_order_id`. They run inside the table actor, so each one is a
//! single atomic read-modify-write of the table record.

use crate::model::{OrderId, OutletId, Reservation, SessionEpoch, Table};

#[derive(Debug, Clone)]
pub enum TableAction {
    /// Lease the table for the outlet's caller. Leasing an already leased
    /// table succeeds without effect and reports `fresh = false`.
    TryClaim { outlet_id: OutletId },
    /// Clear the lease and the active order, and rotate the epoch.
    Release,
    /// Staff pre-seating: lease without an order, keeping the current epoch.
    Reserve(Reservation),
    /// Point the table at its newest order, but only while `epoch` is still
    /// the table's epoch. A release in between makes this a no-op.
    SetActiveOrder { order_id: OrderId, epoch: SessionEpoch },
    /// Undo a fresh claim whose order never got stored. Only applies while
    /// the table is still leased under `epoch` with no active order.
    Unclaim { epoch: SessionEpoch },
}

/// Outcome of a claim attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub epoch: SessionEpoch,
    /// True only for the request that flipped the table from free to leased.
    pub fresh: bool,
    /// The newest order placed under `epoch`, if any.
    pub active_order_id: Option<OrderId>,
}

/// Results from TableActions - variants match 1:1 with TableAction
#[derive(Debug, Clone)]
pub enum TableActionResult {
    TryClaim(Claim),
    Release(Table),
    Reserve(Table),
    SetActiveOrder(bool),
    Unclaim(bool),
}
