//! Purchase order CRUD.
//!
//! Order creates and updates flow through the store's recalculation
//! trigger; deletes do not, unless the store was configured otherwise.

use tracing::info;

use crate::domain::{OrderDraft, PurchaseOrder, PurchaseOrderId, VendorId};
use crate::error::{Error, Result};
use crate::port::VendorStore;

/// Service surface for purchase-order operations.
pub struct OrderService<S> {
    store: S,
}

impl<S: VendorStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: &OrderDraft) -> Result<PurchaseOrder> {
        validate_order(draft)?;
        let order = self.store.create_order(draft).await?;
        info!(po_number = %order.po_number, vendor_id = order.vendor_id.0, "Purchase order created");
        Ok(order)
    }

    pub async fn get(&self, id: PurchaseOrderId) -> Result<PurchaseOrder> {
        self.store.get_order(id).await?.ok_or(Error::NotFound {
            entity: "purchase order",
            id: id.to_string(),
        })
    }

    pub async fn list(&self, vendor: Option<VendorId>) -> Result<Vec<PurchaseOrder>> {
        self.store.list_orders(vendor).await
    }

    pub async fn update(&self, id: PurchaseOrderId, draft: &OrderDraft) -> Result<PurchaseOrder> {
        validate_order(draft)?;
        let order = self.store.update_order(id, draft).await?;
        info!(po_number = %order.po_number, "Purchase order updated");
        Ok(order)
    }

    pub async fn delete(&self, id: PurchaseOrderId) -> Result<bool> {
        let deleted = self.store.delete_order(id).await?;
        if deleted {
            info!(order_id = id.0, "Purchase order deleted");
        }
        Ok(deleted)
    }
}

fn validate_order(draft: &OrderDraft) -> Result<()> {
    if draft.po_number.trim().is_empty() {
        return Err(Error::Validation {
            field: "po_number",
            reason: "must not be empty".into(),
        });
    }
    if draft.status.is_empty() {
        return Err(Error::Validation {
            field: "status",
            reason: "must not be empty".into(),
        });
    }
    if draft.quantity <= 0 {
        return Err(Error::Validation {
            field: "quantity",
            reason: format!("must be positive, got {}", draft.quantity),
        });
    }
    if let Some(rating) = draft.quality_rating {
        if !rating.is_finite() || rating < 0.0 {
            return Err(Error::Validation {
                field: "quality_rating",
                reason: format!("must be a non-negative number, got {rating}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VendorId;
    use chrono::Utc;

    fn draft() -> OrderDraft {
        OrderDraft {
            po_number: "PO001".into(),
            vendor_id: VendorId(1),
            order_date: Utc::now(),
            delivery_date: Utc::now(),
            items: vec![],
            quantity: 10,
            status: "pending".into(),
            quality_rating: None,
            issue_date: Utc::now(),
            acknowledgment_date: None,
        }
    }

    #[test]
    fn rejects_missing_po_number() {
        let mut d = draft();
        d.po_number = String::new();
        assert!(matches!(
            validate_order(&d),
            Err(Error::Validation { field: "po_number", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let mut d = draft();
        d.quantity = 0;
        assert!(validate_order(&d).is_err());
    }

    #[test]
    fn rejects_negative_rating() {
        let mut d = draft();
        d.quality_rating = Some(-1.0);
        assert!(validate_order(&d).is_err());
    }

    #[test]
    fn accepts_arbitrary_status_strings() {
        let mut d = draft();
        d.status = "on hold".into();
        assert!(validate_order(&d).is_ok());
    }
}
