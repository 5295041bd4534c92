//! Purchase order entity and write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{PurchaseOrderId, VendorId};

/// Status value that counts toward the fulfillment rate. Comparison is
/// case-sensitive; any other string is stored as-is and ignored by the
/// fulfillment metric.
pub const STATUS_COMPLETED: &str = "completed";

/// Conventional status for an order that has not been delivered yet.
pub const STATUS_PENDING: &str = "pending";

/// One line of an order: an opaque item name and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item: String,
    pub quantity: i32,
}

/// A single procurement transaction against a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    /// Unique order number, e.g. "PO001".
    pub po_number: String,
    pub vendor_id: VendorId,
    pub order_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub quantity: i32,
    /// Free-form status string; the store does not constrain it to an enum.
    pub status: String,
    /// Present only once the delivery has been graded.
    pub quality_rating: Option<f64>,
    pub issue_date: DateTime<Utc>,
    /// Present once the vendor has acknowledged receipt. May precede
    /// issue_date; the store enforces no ordering between timestamps.
    pub acknowledgment_date: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub po_number: String,
    pub vendor_id: VendorId,
    pub order_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub quantity: i32,
    pub status: String,
    pub quality_rating: Option<f64>,
    pub issue_date: DateTime<Utc>,
    pub acknowledgment_date: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}
