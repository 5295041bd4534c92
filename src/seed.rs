//! Demo-data loader for local development.
//!
//! Wipes the store and loads two vendors with a small mix of completed and
//! pending orders. Orders go through the normal write path, so the cached
//! metrics and history rows come out of the real recalculation trigger.

use chrono::{Duration, Utc};
use tracing::info;

use crate::domain::{LineItem, OrderDraft, VendorDraft, VendorId, STATUS_COMPLETED, STATUS_PENDING};
use crate::error::Result;
use crate::port::VendorStore;

pub async fn load_demo_data<S: VendorStore>(store: &S) -> Result<()> {
    for vendor in store.list_vendors().await? {
        store.delete_vendor(vendor.id).await?;
    }

    let now = Utc::now();

    let vendor1 = store
        .create_vendor(&VendorDraft {
            name: "Test Vendor 1".into(),
            contact_details: "contact1@example.com".into(),
            address: "123 Test Street".into(),
            vendor_code: "V001".into(),
        })
        .await?;
    let vendor2 = store
        .create_vendor(&VendorDraft {
            name: "Test Vendor 2".into(),
            contact_details: "contact2@example.com".into(),
            address: "456 Test Avenue".into(),
            vendor_code: "V002".into(),
        })
        .await?;

    store
        .create_order(&order(
            "PO001",
            vendor1.id,
            now + Duration::days(7),
            "item1",
            10,
            STATUS_COMPLETED,
            Some(4.5),
            Some(now + Duration::days(1)),
        ))
        .await?;
    store
        .create_order(&order(
            "PO002",
            vendor1.id,
            now + Duration::days(10),
            "item2",
            5,
            STATUS_PENDING,
            None,
            None,
        ))
        .await?;

    store
        .create_order(&order(
            "PO003",
            vendor2.id,
            now + Duration::days(5),
            "item3",
            20,
            STATUS_COMPLETED,
            Some(5.0),
            Some(now + Duration::hours(5)),
        ))
        .await?;
    store
        .create_order(&order(
            "PO004",
            vendor2.id,
            now + Duration::days(3),
            "item4",
            15,
            STATUS_PENDING,
            None,
            None,
        ))
        .await?;

    info!("Demo data loaded: 2 vendors, 4 purchase orders");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn order(
    po_number: &str,
    vendor_id: VendorId,
    delivery: chrono::DateTime<Utc>,
    item: &str,
    quantity: i32,
    status: &str,
    quality_rating: Option<f64>,
    acknowledgment_date: Option<chrono::DateTime<Utc>>,
) -> OrderDraft {
    let now = Utc::now();
    OrderDraft {
        po_number: po_number.into(),
        vendor_id,
        order_date: now,
        delivery_date: delivery,
        items: vec![LineItem {
            item: item.into(),
            quantity,
        }],
        quantity,
        status: status.into(),
        quality_rating,
        issue_date: now,
        acknowledgment_date,
    }
}
