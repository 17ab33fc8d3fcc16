//! # Floor Events
//!
//! Publish/subscribe channel for "something changed on the floor"
//! notifications, consumed by staff dashboards. Every event names its outlet
//! and a subscriber only sees the outlet it asked for.
//!
//! Events are hints to refresh, not a log: a slow subscriber that falls
//! behind skips the missed events and carries on.

use crate::model::{OrderId, OrderStatus, OutletId, SessionEpoch, TableId};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FloorEvent {
    OrderPlaced {
        outlet_id: OutletId,
        order_id: OrderId,
        table_id: Option<TableId>,
    },
    OrderStatusChanged {
        outlet_id: OutletId,
        order_id: OrderId,
        status: OrderStatus,
    },
    TableReleased {
        outlet_id: OutletId,
        table_id: TableId,
        epoch: SessionEpoch,
    },
    TableReserved {
        outlet_id: OutletId,
        table_id: TableId,
    },
}

impl FloorEvent {
    pub fn outlet_id(&self) -> &OutletId {
        match self {
            FloorEvent::OrderPlaced { outlet_id, .. }
            | FloorEvent::OrderStatusChanged { outlet_id, .. }
            | FloorEvent::TableReleased { outlet_id, .. }
            | FloorEvent::TableReserved { outlet_id, .. } => outlet_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<FloorEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Never fails; with no subscribers the event is dropped.
    pub fn publish(&self, event: FloorEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!(receivers, "Floor event published"),
            Err(_) => debug!("Floor event dropped, no subscribers"),
        }
    }

    pub fn subscribe(&self, outlet_id: OutletId) -> OutletEvents {
        OutletEvents {
            outlet_id,
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiver filtered to one outlet.
pub struct OutletEvents {
    outlet_id: OutletId,
    rx: broadcast::Receiver<FloorEvent>,
}

impl OutletEvents {
    /// Next event for this outlet, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<FloorEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.outlet_id() == &self.outlet_id => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(outlet = %self.outlet_id, skipped, "Subscriber lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv); `None` when nothing is pending.
    pub fn try_recv(&mut self) -> Option<FloorEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.outlet_id() == &self.outlet_id => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(outlet = %self.outlet_id, skipped, "Subscriber lagged, events skipped");
                }
                Err(_) => return None,
            }
        }
    }
}
