//! Vendor performance metrics and their recalculation.
//!
//! The recalculation is a pure full scan over a vendor's current order set.
//! It is deliberately not an incremental delta: recomputing from scratch on
//! every write keeps the cached metrics consistent with the order set no
//! matter what order the writes arrived in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::PurchaseOrder;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// The four cached vendor metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Fraction of orders delivered no later than the reference delivery date.
    pub on_time_delivery_rate: f64,
    /// Mean quality rating over graded orders.
    pub quality_rating_avg: f64,
    /// Mean acknowledgment latency in hours over acknowledged orders.
    pub average_response_time: f64,
    /// Fraction of orders with status "completed".
    pub fulfillment_rate: f64,
}

/// Recompute all four metrics over a vendor's full order set.
///
/// `reference_delivery` is the delivery date of the order whose write
/// triggered the recalculation. The on-time rate compares every order's
/// delivery date against it, not against the current time. Pass the latest
/// remaining delivery date when recomputing after a delete.
///
/// Total over all inputs: every empty-denominator case yields 0.
#[must_use]
pub fn recalculate(
    orders: &[PurchaseOrder],
    reference_delivery: DateTime<Utc>,
) -> PerformanceMetrics {
    let total = orders.len();
    if total == 0 {
        return PerformanceMetrics::default();
    }

    let on_time = orders
        .iter()
        .filter(|o| o.delivery_date <= reference_delivery)
        .count();
    let on_time_delivery_rate = on_time as f64 / total as f64;

    let ratings: Vec<f64> = orders.iter().filter_map(|o| o.quality_rating).collect();
    let quality_rating_avg = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };

    let response_hours: Vec<f64> = orders
        .iter()
        .filter_map(|o| {
            o.acknowledgment_date
                .map(|ack| (ack - o.issue_date).num_seconds() as f64 / SECONDS_PER_HOUR)
        })
        .collect();
    let average_response_time = if response_hours.is_empty() {
        0.0
    } else {
        response_hours.iter().sum::<f64>() / response_hours.len() as f64
    };

    let completed = orders.iter().filter(|o| o.is_completed()).count();
    let fulfillment_rate = completed as f64 / total as f64;

    PerformanceMetrics {
        on_time_delivery_rate,
        quality_rating_avg,
        average_response_time,
        fulfillment_rate,
    }
}
