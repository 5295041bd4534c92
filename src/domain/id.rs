//! Identifier newtypes for stored entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Database identity of a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VendorId(pub i32);

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for VendorId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Database identity of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PurchaseOrderId(pub i32);

impl fmt::Display for PurchaseOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PurchaseOrderId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
