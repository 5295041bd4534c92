//! Store port for persistence operations.
//!
//! Defines the persistence seam consumed by the service layer and, through
//! it, by the API collaborator in front of this crate.

use std::future::Future;

use crate::domain::{
    OrderDraft, PerformanceMetrics, PerformanceSnapshot, PurchaseOrder, PurchaseOrderId, Vendor,
    VendorDraft, VendorId,
};
use crate::error::Result;

/// Persistence operations for vendors, purchase orders, and snapshots.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `create_order` and `update_order` must recalculate the vendor's four
///   metrics and append exactly one performance snapshot, atomically with
///   the order write. A failed recalculation step fails the whole write.
/// - `delete_order` must not recalculate unless the implementation was
///   explicitly configured to do so.
/// - Unique violations on `vendor_code` / `po_number` surface as
///   [`Error::UniqueConstraint`](crate::error::Error::UniqueConstraint).
pub trait VendorStore: Send + Sync {
    /// Create a vendor with zeroed metrics.
    fn create_vendor(&self, draft: &VendorDraft) -> impl Future<Output = Result<Vendor>> + Send;

    /// Get a vendor by ID.
    fn get_vendor(&self, id: VendorId) -> impl Future<Output = Result<Option<Vendor>>> + Send;

    /// Look a vendor up by its unique business code.
    fn find_vendor_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Vendor>>> + Send;

    /// List all vendors.
    fn list_vendors(&self) -> impl Future<Output = Result<Vec<Vendor>>> + Send;

    /// Update a vendor's identity fields. Cached metrics are untouched.
    fn update_vendor(
        &self,
        id: VendorId,
        draft: &VendorDraft,
    ) -> impl Future<Output = Result<Vendor>> + Send;

    /// Delete a vendor, cascading to its orders and snapshots.
    /// Returns true if the vendor existed.
    fn delete_vendor(&self, id: VendorId) -> impl Future<Output = Result<bool>> + Send;

    /// Persist a new purchase order and run the recalculation trigger.
    fn create_order(&self, draft: &OrderDraft)
        -> impl Future<Output = Result<PurchaseOrder>> + Send;

    /// Get a purchase order by ID.
    fn get_order(
        &self,
        id: PurchaseOrderId,
    ) -> impl Future<Output = Result<Option<PurchaseOrder>>> + Send;

    /// List purchase orders, optionally restricted to one vendor.
    fn list_orders(
        &self,
        vendor: Option<VendorId>,
    ) -> impl Future<Output = Result<Vec<PurchaseOrder>>> + Send;

    /// Replace a purchase order's fields and run the recalculation trigger.
    fn update_order(
        &self,
        id: PurchaseOrderId,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<PurchaseOrder>> + Send;

    /// Delete a purchase order. Returns true if the order existed.
    fn delete_order(&self, id: PurchaseOrderId) -> impl Future<Output = Result<bool>> + Send;

    /// All orders currently belonging to a vendor. No ordering guarantee.
    fn orders_for_vendor(
        &self,
        vendor: VendorId,
    ) -> impl Future<Output = Result<Vec<PurchaseOrder>>> + Send;

    /// The vendor's cached metrics as stored; never recomputed on read.
    fn performance(
        &self,
        vendor: VendorId,
    ) -> impl Future<Output = Result<PerformanceMetrics>> + Send;

    /// Performance snapshots for a vendor, newest first.
    fn history_for_vendor(
        &self,
        vendor: VendorId,
    ) -> impl Future<Output = Result<Vec<PerformanceSnapshot>>> + Send;
}
