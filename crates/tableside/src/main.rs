//! # Tableside demo
//!
//! Walks one table through a full session: first order, a stranger turned
//! away, the returning customer, the kitchen, release and the next guest.
//! Every coordinator result is printed as the JSON envelope a caller would
//! receive.
//!
//! ```bash
//! RUST_LOG=info cargo run -p tableside
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tableside::catalog::InMemoryCatalog;
use tableside::config::ServiceConfig;
use tableside::error::{ApiResponse, ServiceError};
use tableside::lifecycle::{setup_tracing, FrontOfHouse};
use tableside::model::{OrderItemRequest, OrderStatus, TableCreate};
use tableside::session::{Caller, PlaceOrderRequest, StaffContext, StaffRole};
use tracing::{info, Instrument};

fn print<T: Serialize>(step: &str, result: Result<T, ServiceError>) {
    let response = ApiResponse::from(result);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("--- {step}\n{json}"),
        Err(e) => println!("--- {step}\n<unprintable: {e}>"),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.add_item("nasi-lemak", "Nasi Lemak", Decimal::new(850, 2));
    catalog.add_item("teh-tarik", "Teh Tarik", Decimal::new(350, 2));

    let service = FrontOfHouse::new(ServiceConfig::from_env(), catalog);
    let floor = service.coordinator.clone();
    let manager = StaffContext::new("mgr-1", StaffRole::Manager);
    let kitchen = StaffContext::new("chef-1", StaffRole::Kitchen);
    let outlet = "downtown";

    let table = floor
        .create_table(
            TableCreate {
                outlet_id: outlet.into(),
                label: "T1".into(),
                capacity: 4,
                floor: None,
                shape: None,
            },
            &manager,
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(table_id = %table.id, "Demo table ready");

    let mut events = floor.subscribe(outlet.into());

    // 1. First customer claims the free table.
    let first = floor
        .place_order(PlaceOrderRequest::at_table(
            outlet,
            table.id,
            vec![OrderItemRequest::new("nasi-lemak", 2)],
        ))
        .instrument(tracing::info_span!("scenario_1"))
        .await;
    print("1. first order claims the table", first.clone());
    let first = first.map_err(|e| e.to_string())?;

    // 2. A stranger without a token is turned away.
    let stranger = floor
        .place_order(PlaceOrderRequest::at_table(
            outlet,
            table.id,
            vec![OrderItemRequest::new("teh-tarik", 1)],
        ))
        .instrument(tracing::info_span!("scenario_2"))
        .await;
    print("2. another customer is rejected", stranger);

    // 3. The original customer orders again with their token.
    let second = floor
        .place_order(
            PlaceOrderRequest::at_table(outlet, table.id, vec![OrderItemRequest::new("teh-tarik", 2)])
                .with_token(first.customer_token.clone()),
        )
        .instrument(tracing::info_span!("scenario_3"))
        .await;
    print("3. returning customer joins the session", second.clone());
    let second = second.map_err(|e| e.to_string())?;

    // 4. The kitchen works through the first order; skipping is refused.
    for target in [OrderStatus::Cooking, OrderStatus::Ready, OrderStatus::Delivered] {
        let advanced = floor.advance_status(first.order.id, target, &kitchen).await;
        print(&format!("4. first order -> {target}"), advanced);
    }
    let skipped = floor
        .advance_status(second.order.id, OrderStatus::Delivered, &kitchen)
        .await;
    print("4. second order placed -> delivered", skipped);

    // 5. Staff release the table; the old token now sees nothing.
    print("5. release", floor.release_table(table.id, &manager).await);
    let stale = floor
        .list_table_orders(table.id, &Caller::Customer(Some(first.customer_token.clone())))
        .await;
    print("5. listing with the old token", stale);

    // 6. The next guest starts a fresh session.
    let next = floor
        .place_order(PlaceOrderRequest::at_table(
            outlet,
            table.id,
            vec![OrderItemRequest::new("nasi-lemak", 1)],
        ))
        .instrument(tracing::info_span!("scenario_6"))
        .await;
    print("6. next guest claims the table", next);

    print("floor view", floor.floor_view(outlet.into(), &manager).await);

    let mut seen = 0;
    while let Some(event) = events.try_recv() {
        info!(?event, "Floor event");
        seen += 1;
    }
    info!(events = seen, "Dashboard events received");

    drop(events);
    drop(floor);
    service.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
