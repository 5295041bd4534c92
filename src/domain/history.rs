//! Historical performance snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::VendorId;
use super::metrics::PerformanceMetrics;

/// Immutable snapshot of a vendor's four metrics at a point in time.
///
/// One row is appended per recalculation event (i.e. per purchase-order
/// write); rows are never updated or individually deleted. They go away
/// only when their vendor is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub id: i32,
    pub vendor_id: VendorId,
    /// Assigned by the store at insert time.
    pub recorded_at: DateTime<Utc>,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

impl PerformanceSnapshot {
    #[must_use]
    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            on_time_delivery_rate: self.on_time_delivery_rate,
            quality_rating_avg: self.quality_rating_avg,
            average_response_time: self.average_response_time,
            fulfillment_rate: self.fulfillment_rate,
        }
    }
}
