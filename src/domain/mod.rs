//! Store-agnostic domain types and the metrics recalculator.

mod history;
mod id;
mod order;
mod vendor;

pub mod metrics;

pub use history::PerformanceSnapshot;
pub use id::{PurchaseOrderId, VendorId};
pub use metrics::PerformanceMetrics;
pub use order::{LineItem, OrderDraft, PurchaseOrder, STATUS_COMPLETED, STATUS_PENDING};
pub use vendor::{Vendor, VendorDraft};
