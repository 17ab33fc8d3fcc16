//! [`ActorEntity`] implementation for [`Table`].
//!
//! The lease state machine lives in `handle_action`. Because the actor
//! processes one request at a time, two concurrent `TryClaim`s on a free
//! table are serialised: the first flips `leased` and reports `fresh`, the
//! second sees the lease and reports the same epoch with `fresh = false`.

use super::actions::{Claim, TableAction, TableActionResult};
use super::error::TableError;
use crate::model::{SessionEpoch, Table, TableCreate, TableId, TableQuery, TableUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::debug;

fn validate_label(label: &str) -> Result<String, TableError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(TableError::EmptyLabel);
    }
    Ok(label.to_string())
}

fn validate_capacity(capacity: u32) -> Result<u32, TableError> {
    if capacity == 0 {
        return Err(TableError::InvalidCapacity(capacity));
    }
    Ok(capacity)
}

#[async_trait]
impl ActorEntity for Table {
    type Id = TableId;
    type Create = TableCreate;
    type Update = TableUpdate;
    type Action = TableAction;
    type ActionResult = TableActionResult;
    type Query = TableQuery;
    type Context = ();
    type Error = TableError;

    fn from_create_params(id: TableId, params: TableCreate) -> Result<Self, TableError> {
        let label = validate_label(&params.label)?;
        let capacity = validate_capacity(params.capacity)?;
        let mut table = Table::new(id, params.outlet_id, label, capacity);
        if let Some(floor) = params.floor {
            table.floor = floor;
        }
        if let Some(shape) = params.shape {
            table.shape = shape;
        }
        Ok(table)
    }

    fn matches(&self, query: &TableQuery) -> bool {
        match query {
            TableQuery::Outlet(outlet_id) => &self.outlet_id == outlet_id,
        }
    }

    /// Labels are unique per outlet, ignoring case.
    fn unique_key(&self) -> Option<String> {
        Some(format!("{}/{}", self.outlet_id, self.label.to_lowercase()))
    }

    /// Only descriptive fields; the lease is changed through actions.
    async fn on_update(&mut self, update: TableUpdate, _ctx: &()) -> Result<(), TableError> {
        if let Some(label) = update.label {
            self.label = validate_label(&label)?;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = validate_capacity(capacity)?;
        }
        if let Some(floor) = update.floor {
            self.floor = floor;
        }
        if let Some(shape) = update.shape {
            self.shape = shape;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), TableError> {
        if self.leased {
            return Err(TableError::StillLeased(self.id.to_string()));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TableAction,
        _ctx: &(),
    ) -> Result<TableActionResult, TableError> {
        match action {
            TableAction::TryClaim { outlet_id } => {
                if self.outlet_id != outlet_id {
                    return Err(TableError::WrongOutlet {
                        table: self.id.to_string(),
                        outlet: outlet_id.to_string(),
                    });
                }
                let fresh = !self.leased;
                self.leased = true;
                Ok(TableActionResult::TryClaim(Claim {
                    epoch: self.session_epoch,
                    fresh,
                    active_order_id: self.active_order_id,
                }))
            }
            TableAction::Release => {
                self.leased = false;
                self.active_order_id = None;
                self.reservation = None;
                self.session_epoch = SessionEpoch::mint();
                Ok(TableActionResult::Release(self.clone()))
            }
            TableAction::Reserve(reservation) => {
                self.leased = true;
                self.reservation = Some(reservation);
                Ok(TableActionResult::Reserve(self.clone()))
            }
            TableAction::SetActiveOrder { order_id, epoch } => {
                if !self.leased || self.session_epoch != epoch {
                    debug!(table_id = %self.id, %order_id, "Epoch moved on, active order not set");
                    return Ok(TableActionResult::SetActiveOrder(false));
                }
                self.active_order_id = Some(order_id);
                Ok(TableActionResult::SetActiveOrder(true))
            }
            TableAction::Unclaim { epoch } => {
                let undo = self.leased
                    && self.session_epoch == epoch
                    && self.active_order_id.is_none()
                    && self.reservation.is_none();
                if undo {
                    self.leased = false;
                }
                Ok(TableActionResult::Unclaim(undo))
            }
        }
    }
}
