//! Custom actions and queries for the Order actor.

use crate::model::{CustomerToken, OrderStatus, OutletId, SessionEpoch, StaffId, TableId};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order to `target`, recording `staff` on the matching
    /// accountability field.
    Advance {
        target: OrderStatus,
        staff: Option<StaffId>,
    },
}

/// Filter for listing orders.
#[derive(Debug, Clone)]
pub enum OrderQuery {
    /// Orders of one table session, optionally only those carrying `token`.
    TableSession {
        table_id: TableId,
        epoch: SessionEpoch,
        token: Option<CustomerToken>,
    },
    /// Every order of an outlet, or only the non-terminal ones.
    Outlet { outlet_id: OutletId, open_only: bool },
}
