//! Orders, their line-item snapshots and the status state machine.
//!
//! # Actor Framework
//! [`Order`] is managed by a [`ResourceActor`](actor_framework::ResourceActor);
//! see [`crate::order_actor`] for the transition action.

use crate::model::{CatalogRef, CustomerToken, OrderId, OutletId, SessionEpoch, StaffId, TableId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Cooking,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Placed,
        OrderStatus::Cooking,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The next step of the fulfilment chain, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Cooking),
            OrderStatus::Cooking => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// `target` is legal iff it is the next chain step, or `Cancelled` from a
    /// non-terminal status.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == OrderStatus::Cancelled || self.next() == Some(target)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modifier as sent by a client: free text ("No Onion") or a structured
/// choice from a modifier group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierInput {
    Text(String),
    #[serde(rename_all = "camelCase")]
    Choice {
        #[serde(alias = "name")]
        group: String,
        #[serde(alias = "label")]
        option: String,
        #[serde(default)]
        price_adjustment: Option<Decimal>,
    },
}

impl ModifierInput {
    /// The frozen descriptor and the per-unit price adjustment.
    ///
    /// Choices render as `"group: option (+adj)"`; a zero adjustment is omitted.
    pub fn describe(&self) -> (String, Decimal) {
        match self {
            ModifierInput::Text(text) => (text.trim().to_string(), Decimal::ZERO),
            ModifierInput::Choice {
                group,
                option,
                price_adjustment,
            } => {
                let adjustment = price_adjustment.unwrap_or(Decimal::ZERO);
                let suffix = if adjustment > Decimal::ZERO {
                    format!(" (+{adjustment})")
                } else if adjustment < Decimal::ZERO {
                    format!(" ({adjustment})")
                } else {
                    String::new()
                };
                (format!("{group}: {option}{suffix}").trim().to_string(), adjustment)
            }
        }
    }
}

/// One requested line of a new order, before catalog resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub catalog_ref: CatalogRef,
    pub quantity: u32,
    #[serde(default)]
    pub modifiers: Vec<ModifierInput>,
}

impl OrderItemRequest {
    pub fn new(catalog_ref: impl Into<CatalogRef>, quantity: u32) -> Self {
        Self {
            catalog_ref: catalog_ref.into(),
            quantity,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: ModifierInput) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// Write-once snapshot of a catalog item taken when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub catalog_ref: CatalogRef,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub modifiers: Vec<String>,
    /// Sum of the modifier adjustments, charged per unit.
    pub modifier_total: Decimal,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        (self.unit_price + self.modifier_total) * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub outlet_id: OutletId,
    pub table_id: Option<TableId>,
    /// The table's epoch at creation; `None` for takeaway and delivery orders.
    pub session_epoch: Option<SessionEpoch>,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(skip_serializing)]
    pub customer_token: CustomerToken,
    pub notes: Option<String>,
    pub taken_by: Option<StaffId>,
    pub prepared_by: Option<StaffId>,
    pub delivered_by: Option<StaffId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new order. Items are already resolved snapshots.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub outlet_id: OutletId,
    pub table_id: Option<TableId>,
    pub session_epoch: Option<SessionEpoch>,
    pub items: Vec<LineItem>,
    pub notes: Option<String>,
    pub customer_token: CustomerToken,
    pub taken_by: Option<StaffId>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Status rule for this order. Dine-in orders are served at the table,
    /// so they may go from `ready` straight to `delivered`.
    pub fn can_advance_to(&self, target: OrderStatus) -> bool {
        self.status.can_transition_to(target)
            || (self.table_id.is_some() && self.status == OrderStatus::Ready && target == OrderStatus::Delivered)
    }

    /// True if this order belongs to the given table session.
    pub fn in_session(&self, table_id: TableId, epoch: SessionEpoch) -> bool {
        self.table_id == Some(table_id) && self.session_epoch == Some(epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_transitions() {
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Cooking));
        assert!(OrderStatus::Cooking.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::OutForDelivery));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_skipping_and_going_back_are_rejected() {
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Cooking));
        assert!(!OrderStatus::Cooking.can_transition_to(OrderStatus::Cooking));
    }

    #[test]
    fn test_cancel_from_every_open_status() {
        for status in OrderStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(
                status.can_transition_to(OrderStatus::Cancelled),
                "{status} should be cancellable"
            );
        }
    }

    #[test]
    fn test_terminal_statuses_reject_everything() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            for to in OrderStatus::ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to} must fail");
            }
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "out_for_delivery");
    }

    #[test]
    fn test_modifier_descriptors() {
        let text = ModifierInput::Text(" No Onion ".into());
        assert_eq!(text.describe(), ("No Onion".to_string(), Decimal::ZERO));

        let extra = ModifierInput::Choice {
            group: "Size".into(),
            option: "Large".into(),
            price_adjustment: Some(Decimal::new(150, 2)),
        };
        assert_eq!(
            extra.describe(),
            ("Size: Large (+1.50)".to_string(), Decimal::new(150, 2))
        );

        let discount = ModifierInput::Choice {
            group: "Rice".into(),
            option: "None".into(),
            price_adjustment: Some(Decimal::new(-5, 1)),
        };
        assert_eq!(discount.describe().0, "Rice: None (-0.5)");

        let free = ModifierInput::Choice {
            group: "Spice".into(),
            option: "Mild".into(),
            price_adjustment: None,
        };
        assert_eq!(free.describe().0, "Spice: Mild");
    }

    #[test]
    fn test_modifier_accepts_both_wire_shapes() {
        let parsed: Vec<ModifierInput> = serde_json::from_str(
            r#"["Extra Spicy", {"name": "Size", "label": "Small", "priceAdjustment": -1}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0], ModifierInput::Text("Extra Spicy".into()));
        assert_eq!(parsed[1].describe().0, "Size: Small (-1)");
    }

    #[test]
    fn test_line_total_includes_modifiers() {
        let item = LineItem {
            catalog_ref: "nasi".into(),
            name: "Nasi Goreng".into(),
            unit_price: Decimal::new(1200, 2),
            quantity: 2,
            modifiers: vec!["Egg: Fried (+2.00)".into()],
            modifier_total: Decimal::new(200, 2),
        };
        assert_eq!(item.line_total(), Decimal::new(2800, 2));
    }
}
