//! Trait definitions (hexagonal ports). Depend only on domain.

mod store;

pub use store::VendorStore;
