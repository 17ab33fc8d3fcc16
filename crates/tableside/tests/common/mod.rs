#![allow(dead_code)]

use rust_decimal::Decimal;
use std::sync::Arc;
use tableside::catalog::InMemoryCatalog;
use tableside::config::ServiceConfig;
use tableside::lifecycle::FrontOfHouse;
use tableside::model::{OrderItemRequest, Table, TableCreate, TableId};
use tableside::session::{PlaceOrderRequest, StaffContext, StaffRole};

pub const OUTLET: &str = "downtown";

pub struct Fixture {
    pub service: FrontOfHouse,
    pub catalog: Arc<InMemoryCatalog>,
    pub table: Table,
    pub manager: StaffContext,
    pub chef: StaffContext,
}

pub fn catalog() -> Arc<InMemoryCatalog> {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.add_item("X", "Char Kway Teow", Decimal::new(1000, 2));
    catalog.add_item("Y", "Iced Milo", Decimal::new(400, 2));
    catalog
}

/// A running service with one free table, "T1", at [`OUTLET`].
pub async fn fixture() -> Fixture {
    let catalog = catalog();
    let service = FrontOfHouse::new(ServiceConfig::default(), catalog.clone());
    let manager = StaffContext::new("mgr-1", StaffRole::Manager);
    let table = service
        .coordinator
        .create_table(table_params(OUTLET, "T1"), &manager)
        .await
        .expect("Failed to create table");

    Fixture {
        service,
        catalog,
        table,
        manager,
        chef: StaffContext::new("chef-1", StaffRole::Kitchen),
    }
}

pub fn table_params(outlet: &str, label: &str) -> TableCreate {
    TableCreate {
        outlet_id: outlet.into(),
        label: label.into(),
        capacity: 4,
        floor: None,
        shape: None,
    }
}

pub fn order_at(table_id: TableId, catalog_ref: &str, quantity: u32) -> PlaceOrderRequest {
    PlaceOrderRequest::at_table(OUTLET, table_id, vec![OrderItemRequest::new(catalog_ref, quantity)])
}
