//! Integration tests for the SQLite store and the recalculation trigger.

use chrono::{DateTime, Duration, TimeZone, Utc};

use vendortrack::adapter::sqlite::{create_pool, run_migrations, SqliteStore};
use vendortrack::config::RecalculationConfig;
use vendortrack::domain::{
    LineItem, OrderDraft, PurchaseOrderId, VendorDraft, VendorId, STATUS_COMPLETED, STATUS_PENDING,
};
use vendortrack::error::Error;
use vendortrack::port::VendorStore;

// A single pooled connection so every query sees the same :memory: database.
fn setup_store(on_delete: bool) -> SqliteStore {
    let pool = create_pool(":memory:", 1).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    SqliteStore::new(pool, RecalculationConfig { on_delete })
}

fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn vendor_draft(code: &str) -> VendorDraft {
    VendorDraft {
        name: format!("Vendor {code}"),
        contact_details: format!("{code}@example.com").to_lowercase(),
        address: "123 Test Street".into(),
        vendor_code: code.into(),
    }
}

fn order_draft(po: &str, vendor: VendorId, delivery: DateTime<Utc>, status: &str) -> OrderDraft {
    OrderDraft {
        po_number: po.into(),
        vendor_id: vendor,
        order_date: ts(2024, 1, 1),
        delivery_date: delivery,
        items: vec![LineItem {
            item: "widget".into(),
            quantity: 10,
        }],
        quantity: 10,
        status: status.into(),
        quality_rating: None,
        issue_date: ts(2024, 1, 1),
        acknowledgment_date: None,
    }
}

// -------------------------------------------------------------------------
// Vendor CRUD
// -------------------------------------------------------------------------

#[tokio::test]
async fn vendor_roundtrip() {
    let store = setup_store(false);

    let created = store.create_vendor(&vendor_draft("V001")).await.unwrap();
    let loaded = store.get_vendor(created.id).await.unwrap().unwrap();

    assert_eq!(loaded.vendor_code, "V001");
    assert_eq!(loaded.name, "Vendor V001");
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn new_vendor_has_all_zero_metrics() {
    let store = setup_store(false);

    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();
    let metrics = store.performance(vendor.id).await.unwrap();

    assert_eq!(metrics.on_time_delivery_rate, 0.0);
    assert_eq!(metrics.quality_rating_avg, 0.0);
    assert_eq!(metrics.average_response_time, 0.0);
    assert_eq!(metrics.fulfillment_rate, 0.0);
}

#[tokio::test]
async fn duplicate_vendor_code_is_rejected() {
    let store = setup_store(false);

    store.create_vendor(&vendor_draft("V001")).await.unwrap();
    let mut second = vendor_draft("V001");
    second.name = "Different Name".into();

    let result = store.create_vendor(&second).await;
    assert!(matches!(
        result,
        Err(Error::UniqueConstraint { field: "vendor_code", .. })
    ));
    assert_eq!(store.list_vendors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_vendor_leaves_metrics_alone() {
    let store = setup_store(false);

    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();
    store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_COMPLETED,
        ))
        .await
        .unwrap();

    let updated = store
        .update_vendor(vendor.id, &vendor_draft("V001-B"))
        .await
        .unwrap();
    assert_eq!(updated.vendor_code, "V001-B");
    assert_eq!(updated.fulfillment_rate, 1.0);
}

#[tokio::test]
async fn update_missing_vendor_is_not_found() {
    let store = setup_store(false);
    let result = store.update_vendor(VendorId(999), &vendor_draft("V9")).await;
    assert!(matches!(result, Err(Error::NotFound { entity: "vendor", .. })));
}

#[tokio::test]
async fn delete_vendor_cascades_to_orders_and_history() {
    let store = setup_store(false);

    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();
    let order = store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_COMPLETED,
        ))
        .await
        .unwrap();
    assert_eq!(store.history_for_vendor(vendor.id).await.unwrap().len(), 1);

    assert!(store.delete_vendor(vendor.id).await.unwrap());
    assert!(store.get_vendor(vendor.id).await.unwrap().is_none());
    assert!(store.get_order(order.id).await.unwrap().is_none());
    assert!(store.history_for_vendor(vendor.id).await.unwrap().is_empty());
    assert!(!store.delete_vendor(vendor.id).await.unwrap());
}

#[tokio::test]
async fn find_vendor_by_code() {
    let store = setup_store(false);
    store.create_vendor(&vendor_draft("V001")).await.unwrap();
    store.create_vendor(&vendor_draft("V002")).await.unwrap();

    let found = store.find_vendor_by_code("V002").await.unwrap().unwrap();
    assert_eq!(found.vendor_code, "V002");
    assert!(store.find_vendor_by_code("V999").await.unwrap().is_none());
}

#[tokio::test]
async fn performance_for_missing_vendor_is_not_found() {
    let store = setup_store(false);
    let result = store.performance(VendorId(42)).await;
    assert!(matches!(result, Err(Error::NotFound { entity: "vendor", .. })));
}

// -------------------------------------------------------------------------
// Recalculation trigger on order writes
// -------------------------------------------------------------------------

#[tokio::test]
async fn two_order_scenario_recalculates_vendor_metrics() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_COMPLETED,
        ))
        .await
        .unwrap();
    store
        .create_order(&order_draft(
            "PO002",
            vendor.id,
            ts(2024, 1, 20),
            STATUS_PENDING,
        ))
        .await
        .unwrap();

    let metrics = store.performance(vendor.id).await.unwrap();
    // Both deliveries are at or before the triggering order's 2024-01-20.
    assert!((metrics.on_time_delivery_rate - 1.0).abs() < 1e-9);
    assert!((metrics.fulfillment_rate - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn on_time_rate_uses_triggering_delivery_as_reference() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 20),
            STATUS_PENDING,
        ))
        .await
        .unwrap();
    // Second write triggers with an earlier delivery date, so only itself
    // is at or before the reference.
    store
        .create_order(&order_draft(
            "PO002",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_PENDING,
        ))
        .await
        .unwrap();

    let metrics = store.performance(vendor.id).await.unwrap();
    assert!((metrics.on_time_delivery_rate - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn quality_and_response_metrics_flow_through_the_store() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    let mut rated = order_draft("PO001", vendor.id, ts(2024, 1, 10), STATUS_COMPLETED);
    rated.quality_rating = Some(4.5);
    rated.issue_date = ts(2024, 1, 1);
    rated.acknowledgment_date = Some(ts(2024, 1, 1) + Duration::hours(12));
    store.create_order(&rated).await.unwrap();

    store
        .create_order(&order_draft(
            "PO002",
            vendor.id,
            ts(2024, 1, 20),
            STATUS_PENDING,
        ))
        .await
        .unwrap();

    let metrics = store.performance(vendor.id).await.unwrap();
    assert!((metrics.quality_rating_avg - 4.5).abs() < 1e-9);
    assert!((metrics.average_response_time - 12.0).abs() < 1e-9);
}

#[tokio::test]
async fn fulfillment_counts_exact_status_only() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    for (po, status) in [
        ("PO001", "completed"),
        ("PO002", "Completed"),
        ("PO003", "COMPLETE"),
        ("PO004", "pending"),
    ] {
        store
            .create_order(&order_draft(po, vendor.id, ts(2024, 1, 10), status))
            .await
            .unwrap();
    }

    let metrics = store.performance(vendor.id).await.unwrap();
    assert!((metrics.fulfillment_rate - 0.25).abs() < 1e-9);
}

#[tokio::test]
async fn every_order_write_appends_exactly_one_snapshot() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();
    assert!(store.history_for_vendor(vendor.id).await.unwrap().is_empty());

    let order = store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_PENDING,
        ))
        .await
        .unwrap();
    assert_eq!(store.history_for_vendor(vendor.id).await.unwrap().len(), 1);

    let mut updated = order_draft("PO001", vendor.id, ts(2024, 1, 10), STATUS_COMPLETED);
    updated.quality_rating = Some(5.0);
    store.update_order(order.id, &updated).await.unwrap();

    let history = store.history_for_vendor(vendor.id).await.unwrap();
    assert_eq!(history.len(), 2);

    // Newest snapshot equals the vendor's post-write metrics.
    let metrics = store.performance(vendor.id).await.unwrap();
    assert_eq!(history[0].metrics(), metrics);
    assert!((metrics.fulfillment_rate - 1.0).abs() < 1e-9);
    assert!((metrics.quality_rating_avg - 5.0).abs() < 1e-9);
}

#[tokio::test]
async fn duplicate_po_number_leaves_metrics_and_history_unchanged() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_COMPLETED,
        ))
        .await
        .unwrap();
    let before = store.performance(vendor.id).await.unwrap();

    let result = store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 20),
            STATUS_PENDING,
        ))
        .await;
    assert!(matches!(
        result,
        Err(Error::UniqueConstraint { field: "po_number", .. })
    ));

    assert_eq!(store.performance(vendor.id).await.unwrap(), before);
    assert_eq!(store.history_for_vendor(vendor.id).await.unwrap().len(), 1);
    assert_eq!(store.orders_for_vendor(vendor.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_po_number_across_vendors_is_rejected() {
    let store = setup_store(false);
    let v1 = store.create_vendor(&vendor_draft("V001")).await.unwrap();
    let v2 = store.create_vendor(&vendor_draft("V002")).await.unwrap();

    store
        .create_order(&order_draft("PO001", v1.id, ts(2024, 1, 10), STATUS_PENDING))
        .await
        .unwrap();
    let result = store
        .create_order(&order_draft("PO001", v2.id, ts(2024, 1, 10), STATUS_PENDING))
        .await;
    assert!(matches!(result, Err(Error::UniqueConstraint { .. })));
}

#[tokio::test]
async fn order_for_missing_vendor_is_rejected_without_side_effects() {
    let store = setup_store(false);
    let result = store
        .create_order(&order_draft(
            "PO001",
            VendorId(999),
            ts(2024, 1, 10),
            STATUS_PENDING,
        ))
        .await;
    assert!(matches!(result, Err(Error::NotFound { entity: "vendor", .. })));
    assert!(store.list_orders(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn order_roundtrip_preserves_fields() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    let mut draft = order_draft("PO001", vendor.id, ts(2024, 1, 10), "on hold");
    draft.items = vec![
        LineItem {
            item: "bolts".into(),
            quantity: 200,
        },
        LineItem {
            item: "nuts".into(),
            quantity: 150,
        },
    ];
    draft.quality_rating = Some(3.5);
    draft.acknowledgment_date = Some(ts(2024, 1, 2));

    let created = store.create_order(&draft).await.unwrap();
    let loaded = store.get_order(created.id).await.unwrap().unwrap();

    assert_eq!(loaded.po_number, "PO001");
    assert_eq!(loaded.status, "on hold");
    assert_eq!(loaded.items.len(), 2);
    assert_eq!(loaded.items[0].item, "bolts");
    assert_eq!(loaded.quality_rating, Some(3.5));
    assert_eq!(loaded.delivery_date, ts(2024, 1, 10));
    assert_eq!(loaded.acknowledgment_date, Some(ts(2024, 1, 2)));
}

// -------------------------------------------------------------------------
// Delete behavior
// -------------------------------------------------------------------------

#[tokio::test]
async fn order_delete_does_not_recalculate_by_default() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    let completed = store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_COMPLETED,
        ))
        .await
        .unwrap();
    store
        .create_order(&order_draft(
            "PO002",
            vendor.id,
            ts(2024, 1, 20),
            STATUS_PENDING,
        ))
        .await
        .unwrap();

    let before = store.performance(vendor.id).await.unwrap();
    assert!(store.delete_order(completed.id).await.unwrap());

    // The order set shrank but the cached metrics keep their last value.
    assert_eq!(store.performance(vendor.id).await.unwrap(), before);
    assert_eq!(store.history_for_vendor(vendor.id).await.unwrap().len(), 2);
    assert_eq!(store.orders_for_vendor(vendor.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn order_delete_recalculates_when_configured() {
    let store = setup_store(true);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    let completed = store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_COMPLETED,
        ))
        .await
        .unwrap();
    store
        .create_order(&order_draft(
            "PO002",
            vendor.id,
            ts(2024, 1, 20),
            STATUS_PENDING,
        ))
        .await
        .unwrap();

    assert!(store.delete_order(completed.id).await.unwrap());

    let metrics = store.performance(vendor.id).await.unwrap();
    assert!((metrics.fulfillment_rate - 0.0).abs() < 1e-9);
    assert!((metrics.on_time_delivery_rate - 1.0).abs() < 1e-9);
    // One snapshot per order write plus one for the recalculating delete.
    assert_eq!(store.history_for_vendor(vendor.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn deleting_last_order_zeroes_metrics_when_configured() {
    let store = setup_store(true);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    let order = store
        .create_order(&order_draft(
            "PO001",
            vendor.id,
            ts(2024, 1, 10),
            STATUS_COMPLETED,
        ))
        .await
        .unwrap();
    assert!(store.delete_order(order.id).await.unwrap());

    let metrics = store.performance(vendor.id).await.unwrap();
    assert_eq!(metrics.on_time_delivery_rate, 0.0);
    assert_eq!(metrics.fulfillment_rate, 0.0);
}

#[tokio::test]
async fn delete_missing_order_returns_false() {
    let store = setup_store(false);
    assert!(!store.delete_order(PurchaseOrderId(123)).await.unwrap());
}

// -------------------------------------------------------------------------
// History ordering and isolation between vendors
// -------------------------------------------------------------------------

#[tokio::test]
async fn history_is_newest_first() {
    let store = setup_store(false);
    let vendor = store.create_vendor(&vendor_draft("V001")).await.unwrap();

    for (po, status) in [("PO001", STATUS_PENDING), ("PO002", STATUS_COMPLETED)] {
        store
            .create_order(&order_draft(po, vendor.id, ts(2024, 1, 10), status))
            .await
            .unwrap();
    }

    let history = store.history_for_vendor(vendor.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].recorded_at >= history[1].recorded_at);
    // The newest snapshot reflects the second write (one of two completed).
    assert!((history[0].fulfillment_rate - 0.5).abs() < 1e-9);
    assert!((history[1].fulfillment_rate - 0.0).abs() < 1e-9);
}

#[tokio::test]
async fn writes_to_one_vendor_do_not_touch_another() {
    let store = setup_store(false);
    let v1 = store.create_vendor(&vendor_draft("V001")).await.unwrap();
    let v2 = store.create_vendor(&vendor_draft("V002")).await.unwrap();

    store
        .create_order(&order_draft("PO001", v1.id, ts(2024, 1, 10), STATUS_COMPLETED))
        .await
        .unwrap();

    let untouched = store.performance(v2.id).await.unwrap();
    assert_eq!(untouched.fulfillment_rate, 0.0);
    assert!(store.history_for_vendor(v2.id).await.unwrap().is_empty());
}
