//! Application services over the store port.

mod orders;
mod vendors;

pub use orders::OrderService;
pub use vendors::VendorService;
