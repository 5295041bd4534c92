//! Vendor entity and write payloads.

use serde::{Deserialize, Serialize};

use super::id::VendorId;
use super::metrics::PerformanceMetrics;

/// A supplier tracked with cached aggregate performance metrics.
///
/// The metric fields are mutated exclusively by the recalculation trigger
/// after purchase-order writes; vendor CRUD never touches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub contact_details: String,
    pub address: String,
    /// Unique business identity, e.g. "V001".
    pub vendor_code: String,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    /// Mean acknowledgment latency in hours.
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

impl Vendor {
    /// The cached four-metric snapshot as currently stored, not recomputed.
    #[must_use]
    pub fn performance(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            on_time_delivery_rate: self.on_time_delivery_rate,
            quality_rating_avg: self.quality_rating_avg,
            average_response_time: self.average_response_time,
            fulfillment_rate: self.fulfillment_rate,
        }
    }
}

/// Payload for creating or updating a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDraft {
    pub name: String,
    pub contact_details: String,
    pub address: String,
    pub vendor_code: String,
}
