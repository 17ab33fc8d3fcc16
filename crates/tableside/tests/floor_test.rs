mod common;

use chrono::Utc;
use common::{fixture, order_at, table_params, OUTLET};
use tableside::error::{ServiceError, StatusCategory};
use tableside::events::FloorEvent;
use tableside::model::{OrderItemRequest, OrderStatus, TableShape, TableUpdate};
use tableside::session::{Caller, PlaceOrderRequest, ReserveTableRequest};

fn reservation(fx: &common::Fixture) -> ReserveTableRequest {
    ReserveTableRequest {
        table_id: fx.table.id,
        guest_name: " Mei Ling ".into(),
        party_size: 3,
        reservation_time: Some(Utc::now()),
    }
}

#[tokio::test]
async fn test_reserved_table_keeps_its_epoch_for_the_first_order() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;

    let reserved = floor.reserve_table(reservation(&fx), &fx.manager).await.unwrap();
    assert!(reserved.leased);
    assert_eq!(reserved.session_epoch, fx.table.session_epoch);
    let details = reserved.reservation.as_ref().unwrap();
    assert_eq!(details.guest_name, "Mei Ling");
    assert_eq!(details.party_size, 3);

    let placed = floor.place_order(order_at(fx.table.id, "X", 1)).await.unwrap();
    assert_eq!(placed.order.session_epoch, Some(fx.table.session_epoch));

    let released = floor.release_table(fx.table.id, &fx.manager).await.unwrap();
    assert_eq!(released.reservation, None);
}

#[tokio::test]
async fn test_reservation_validation() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;

    let blank = ReserveTableRequest {
        guest_name: "   ".into(),
        ..reservation(&fx)
    };
    let nobody = ReserveTableRequest {
        party_size: 0,
        ..reservation(&fx)
    };
    let whenever = ReserveTableRequest {
        reservation_time: None,
        ..reservation(&fx)
    };
    for request in [blank, nobody, whenever] {
        let result = floor.reserve_table(request, &fx.manager).await;
        assert_eq!(result.unwrap_err().category(), StatusCategory::InvalidInput);
    }
    assert!(!floor.get_table(fx.table.id).await.unwrap().leased);

    let missing = ReserveTableRequest {
        table_id: tableside::model::TableId(999),
        ..reservation(&fx)
    };
    let result = floor.reserve_table(missing, &fx.manager).await;
    assert_eq!(result.unwrap_err().category(), StatusCategory::NotFound);
}

#[tokio::test]
async fn test_floor_view_flags_open_orders_without_touching_the_lease() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;
    let t2 = floor
        .create_table(table_params(OUTLET, "T2"), &fx.manager)
        .await
        .unwrap();

    let placed = floor.place_order(order_at(fx.table.id, "X", 1)).await.unwrap();
    let view = floor.floor_view(OUTLET.into(), &fx.manager).await.unwrap();
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].table.id, fx.table.id);
    assert!(view[0].table.leased && view[0].has_open_order);
    assert!(!view[1].table.leased && !view[1].has_open_order);
    assert_eq!(view[1].table.id, t2.id);

    floor
        .advance_status(placed.order.id, OrderStatus::Cancelled, &fx.manager)
        .await
        .unwrap();
    let view = floor.floor_view(OUTLET.into(), &fx.manager).await.unwrap();
    assert!(view[0].table.leased);
    assert!(!view[0].has_open_order);

    let json = serde_json::to_value(&view[0]).unwrap();
    assert_eq!(json["label"], "T1");
    assert_eq!(json["hasOpenOrder"], false);
}

#[tokio::test]
async fn test_table_management() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;

    assert_eq!(fx.table.floor, 1);
    assert_eq!(fx.table.shape, TableShape::Rect);

    let duplicate = floor.create_table(table_params(OUTLET, "t1"), &fx.manager).await;
    assert_eq!(duplicate.unwrap_err().category(), StatusCategory::InvalidInput);
    let elsewhere = floor.create_table(table_params("airport", "T1"), &fx.manager).await;
    assert!(elsewhere.is_ok());

    let updated = floor
        .update_table(
            fx.table.id,
            TableUpdate {
                label: Some("Window 1".into()),
                capacity: Some(6),
                shape: Some(TableShape::Round),
                ..Default::default()
            },
            &fx.manager,
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "Window 1");
    assert_eq!(updated.capacity, 6);
    assert_eq!(updated.shape, TableShape::Round);
    assert_eq!(updated.session_epoch, fx.table.session_epoch);

    let bad = floor
        .update_table(
            fx.table.id,
            TableUpdate {
                capacity: Some(0),
                ..Default::default()
            },
            &fx.manager,
        )
        .await;
    assert_eq!(bad.unwrap_err().category(), StatusCategory::InvalidInput);

    floor.place_order(order_at(fx.table.id, "X", 1)).await.unwrap();
    let leased = floor.delete_table(fx.table.id, &fx.manager).await;
    assert_eq!(leased.unwrap_err().category(), StatusCategory::InvalidInput);

    floor.release_table(fx.table.id, &fx.manager).await.unwrap();
    floor.delete_table(fx.table.id, &fx.manager).await.unwrap();
    let gone = floor.get_table(fx.table.id).await;
    assert_eq!(gone.unwrap_err().category(), StatusCategory::NotFound);
}

#[tokio::test]
async fn test_takeaway_orders_skip_the_lease() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;

    let request = PlaceOrderRequest {
        outlet_id: OUTLET.into(),
        table_id: None,
        items: vec![OrderItemRequest::new("Y", 2)],
        notes: Some("Less ice".into()),
        customer_token: None,
    };
    let first = floor.place_order(request.clone()).await.unwrap();
    let second = floor.place_order(request).await.unwrap();

    assert_eq!(first.order.table_id, None);
    assert_eq!(first.order.session_epoch, None);
    assert_eq!(first.order.notes.as_deref(), Some("Less ice"));
    assert_ne!(first.customer_token, second.customer_token);
    assert!(!floor.get_table(fx.table.id).await.unwrap().leased);

    // Takeaway goes through the delivery leg.
    let id = first.order.id;
    for target in [OrderStatus::Cooking, OrderStatus::Ready] {
        floor.advance_status(id, target, &fx.chef).await.unwrap();
    }
    let skipped = floor.advance_status(id, OrderStatus::Delivered, &fx.chef).await;
    assert_eq!(skipped.unwrap_err().category(), StatusCategory::InvalidTransition);
    floor
        .advance_status(id, OrderStatus::OutForDelivery, &fx.chef)
        .await
        .unwrap();
    floor.advance_status(id, OrderStatus::Delivered, &fx.chef).await.unwrap();
}

#[tokio::test]
async fn test_listing_rules() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;
    let t1 = fx.table.id;

    let no_token = floor.list_table_orders(t1, &Caller::Customer(None)).await;
    assert_eq!(no_token.unwrap_err().category(), StatusCategory::InvalidInput);

    let placed = floor.place_order(order_at(t1, "X", 1)).await.unwrap();
    floor
        .place_order(order_at(t1, "Y", 1).with_token(placed.customer_token.clone()))
        .await
        .unwrap();

    let staff = floor
        .list_table_orders(t1, &Caller::Staff(fx.chef.clone()))
        .await
        .unwrap();
    assert_eq!(staff.len(), 2);
    assert!(staff[0].id < staff[1].id);

    let stranger = floor
        .list_table_orders(t1, &Caller::Customer(Some(tableside::token::TokenIssuer::issue())))
        .await
        .unwrap();
    assert!(stranger.is_empty());

    let unknown = floor
        .list_table_orders(tableside::model::TableId(404), &Caller::Staff(fx.chef.clone()))
        .await;
    assert!(matches!(unknown, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_staff_accountability() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;
    let waiter = tableside::session::StaffContext::new("waiter-7", tableside::session::StaffRole::Waiter);

    let placed = floor
        .place_order_for(order_at(fx.table.id, "X", 1), &waiter)
        .await
        .unwrap();
    assert_eq!(placed.order.taken_by, Some("waiter-7".into()));

    // Staff placement follows the same token rules.
    let other = floor.place_order_for(order_at(fx.table.id, "Y", 1), &waiter).await;
    assert_eq!(other.unwrap_err().category(), StatusCategory::SessionConflict);

    let id = placed.order.id;
    floor.advance_status(id, OrderStatus::Cooking, &fx.chef).await.unwrap();
    floor.advance_status(id, OrderStatus::Ready, &fx.chef).await.unwrap();
    let served = floor.advance_status(id, OrderStatus::Delivered, &waiter).await.unwrap();
    assert_eq!(served.prepared_by, Some("chef-1".into()));
    assert_eq!(served.delivered_by, Some("waiter-7".into()));

    let missing = floor
        .advance_status(tableside::model::OrderId(999), OrderStatus::Cooking, &fx.chef)
        .await;
    assert_eq!(missing.unwrap_err().category(), StatusCategory::NotFound);
}

#[tokio::test]
async fn test_order_board_newest_first() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;

    let first = floor.place_order(order_at(fx.table.id, "X", 1)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = floor
        .place_order(order_at(fx.table.id, "Y", 1).with_token(first.customer_token.clone()))
        .await
        .unwrap();
    floor
        .advance_status(first.order.id, OrderStatus::Cancelled, &fx.manager)
        .await
        .unwrap();

    let all = floor.order_board(OUTLET.into(), false).await.unwrap();
    let ids: Vec<_> = all.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.order.id, first.order.id]);

    let open = floor.order_board(OUTLET.into(), true).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, second.order.id);

    assert!(floor.order_board("airport".into(), false).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_events_follow_the_floor() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;
    let mut downtown = floor.subscribe(OUTLET.into());
    let mut airport = floor.subscribe("airport".into());

    let placed = floor.place_order(order_at(fx.table.id, "X", 1)).await.unwrap();
    floor
        .advance_status(placed.order.id, OrderStatus::Cooking, &fx.chef)
        .await
        .unwrap();
    let released = floor.release_table(fx.table.id, &fx.manager).await.unwrap();
    floor.reserve_table(reservation(&fx), &fx.manager).await.unwrap();

    assert_eq!(
        downtown.recv().await,
        Some(FloorEvent::OrderPlaced {
            outlet_id: OUTLET.into(),
            order_id: placed.order.id,
            table_id: Some(fx.table.id),
        })
    );
    assert_eq!(
        downtown.recv().await,
        Some(FloorEvent::OrderStatusChanged {
            outlet_id: OUTLET.into(),
            order_id: placed.order.id,
            status: OrderStatus::Cooking,
        })
    );
    assert_eq!(
        downtown.recv().await,
        Some(FloorEvent::TableReleased {
            outlet_id: OUTLET.into(),
            table_id: fx.table.id,
            epoch: released.session_epoch,
        })
    );
    assert!(matches!(downtown.recv().await, Some(FloorEvent::TableReserved { .. })));
    assert_eq!(airport.try_recv(), None);
}

#[tokio::test]
async fn test_response_envelope() {
    let fx = fixture().await;
    let floor = &fx.service.coordinator;

    let placed = floor.place_order(order_at(fx.table.id, "X", 1)).await;
    let json = serde_json::to_value(tableside::error::ApiResponse::from(placed)).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["order"]["status"], "placed");
    assert!(json["data"]["customerToken"].is_string());
    assert!(json["data"]["order"].get("customerToken").is_none());

    let rejected = floor.place_order(order_at(fx.table.id, "X", 1)).await;
    let json = serde_json::to_value(tableside::error::ApiResponse::from(rejected)).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCategory"], "SessionConflict");
}
