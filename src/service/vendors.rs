//! Vendor CRUD and performance reads.

use tracing::info;

use crate::domain::{PerformanceMetrics, PerformanceSnapshot, Vendor, VendorDraft, VendorId};
use crate::error::{Error, Result};
use crate::port::VendorStore;

/// Service surface for vendor operations, consumed by the API collaborator.
///
/// Validates write payloads before they reach the store; vendor writes never
/// touch the cached metrics.
pub struct VendorService<S> {
    store: S,
}

impl<S: VendorStore> VendorService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: &VendorDraft) -> Result<Vendor> {
        validate_vendor(draft)?;
        let vendor = self.store.create_vendor(draft).await?;
        info!(vendor_code = %vendor.vendor_code, "Vendor created");
        Ok(vendor)
    }

    pub async fn get(&self, id: VendorId) -> Result<Vendor> {
        self.store.get_vendor(id).await?.ok_or(Error::NotFound {
            entity: "vendor",
            id: id.to_string(),
        })
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Vendor> {
        self.store
            .find_vendor_by_code(code)
            .await?
            .ok_or(Error::NotFound {
                entity: "vendor",
                id: code.to_string(),
            })
    }

    pub async fn list(&self) -> Result<Vec<Vendor>> {
        self.store.list_vendors().await
    }

    pub async fn update(&self, id: VendorId, draft: &VendorDraft) -> Result<Vendor> {
        validate_vendor(draft)?;
        let vendor = self.store.update_vendor(id, draft).await?;
        info!(vendor_code = %vendor.vendor_code, "Vendor updated");
        Ok(vendor)
    }

    /// Delete a vendor, cascading to its orders and history.
    pub async fn delete(&self, id: VendorId) -> Result<bool> {
        let deleted = self.store.delete_vendor(id).await?;
        if deleted {
            info!(vendor_id = id.0, "Vendor deleted");
        }
        Ok(deleted)
    }

    /// The cached four-metric snapshot as stored; never recomputed on read.
    pub async fn performance(&self, id: VendorId) -> Result<PerformanceMetrics> {
        self.store.performance(id).await
    }

    /// Performance snapshots, newest first.
    pub async fn history(&self, id: VendorId) -> Result<Vec<PerformanceSnapshot>> {
        self.store.history_for_vendor(id).await
    }
}

fn validate_vendor(draft: &VendorDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(Error::Validation {
            field: "name",
            reason: "must not be empty".into(),
        });
    }
    if draft.vendor_code.trim().is_empty() {
        return Err(Error::Validation {
            field: "vendor_code",
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}
