//! SQLite persistence adapter.
//!
//! Implements the [`VendorStore`](crate::port::VendorStore) port with
//! Diesel over a pooled SQLite connection.

pub mod connection;
pub mod model;
pub mod schema;

mod store;

pub use connection::{create_pool, run_migrations, DbPool, MIGRATIONS};
pub use store::SqliteStore;
