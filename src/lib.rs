//! Vendortrack - vendor and purchase-order tracking with derived metrics.
//!
//! This crate tracks vendors, their purchase orders, and four cached
//! performance metrics per vendor (on-time delivery rate, quality rating
//! average, average response time, fulfillment rate). Every purchase-order
//! create or update recomputes the metrics over the vendor's full order set
//! and appends an immutable history snapshot, atomically with the write.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Entity types and the pure metrics recalculator
//! - [`error`] - Error types for the crate
//! - [`port`] - Persistence trait consumed by the services
//! - [`adapter`] - SQLite implementation of the store port
//! - [`service`] - Vendor and order services for the API layer in front
//! - [`seed`] - Demo-data loader
//!
//! # Example
//!
//! ```no_run
//! use vendortrack::adapter::sqlite::{create_pool, run_migrations, SqliteStore};
//! use vendortrack::config::Config;
//! use vendortrack::service::VendorService;
//!
//! # fn main() -> vendortrack::error::Result<()> {
//! let config = Config::default();
//! let pool = create_pool(&config.database_url(), config.database.max_connections)?;
//! run_migrations(&pool)?;
//! let service = VendorService::new(SqliteStore::new(pool, config.recalculation));
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod seed;
pub mod service;
