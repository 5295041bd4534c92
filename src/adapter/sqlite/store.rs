//! SQLite vendor store implementation.
//!
//! Implements [`VendorStore`] on top of Diesel, including the recalculation
//! trigger: every purchase-order create or update runs write → full metric
//! recalculation → vendor update → snapshot insert inside one transaction.
//! Running the whole cycle in a single transaction serializes concurrent
//! writes to the same vendor, which the original design left unguarded.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::connection::{configure_sqlite_connection, DbPool};
use super::model::{
    order_from_row, snapshot_from_row, vendor_from_row, NewPurchaseOrderRow, NewSnapshotRow,
    NewVendorRow, PurchaseOrderRow, SnapshotRow, VendorRow,
};
use super::schema::{performance_history, purchase_orders, vendors};
use crate::config::RecalculationConfig;
use crate::domain::{
    metrics, OrderDraft, PerformanceMetrics, PerformanceSnapshot, PurchaseOrder, PurchaseOrderId,
    Vendor, VendorDraft, VendorId,
};
use crate::error::{Error, Result};
use crate::port::VendorStore;

/// SQLite-backed vendor store.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
    recalculation: RecalculationConfig,
}

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

impl SqliteStore {
    /// Create a new store with the given connection pool and policy.
    #[must_use]
    pub fn new(pool: DbPool, recalculation: RecalculationConfig) -> Self {
        Self {
            pool,
            recalculation,
        }
    }

    fn conn(&self) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
        Ok(conn)
    }

    fn order_row(draft: &OrderDraft) -> Result<NewPurchaseOrderRow> {
        Ok(NewPurchaseOrderRow {
            po_number: draft.po_number.clone(),
            vendor_id: draft.vendor_id.0,
            order_date: draft.order_date.to_rfc3339(),
            delivery_date: draft.delivery_date.to_rfc3339(),
            items: serde_json::to_string(&draft.items)?,
            quantity: draft.quantity,
            status: draft.status.clone(),
            quality_rating: draft.quality_rating,
            issue_date: draft.issue_date.to_rfc3339(),
            acknowledgment_date: draft.acknowledgment_date.map(|dt| dt.to_rfc3339()),
        })
    }

    fn load_vendor(conn: &mut SqliteConnection, id: VendorId) -> Result<Option<Vendor>> {
        let row: Option<VendorRow> = vendors::table
            .filter(vendors::id.eq(Some(id.0)))
            .first(conn)
            .optional()?;
        row.map(vendor_from_row).transpose()
    }

    fn require_vendor(conn: &mut SqliteConnection, id: VendorId) -> Result<Vendor> {
        Self::load_vendor(conn, id)?.ok_or(Error::NotFound {
            entity: "vendor",
            id: id.to_string(),
        })
    }

    fn load_order(
        conn: &mut SqliteConnection,
        id: PurchaseOrderId,
    ) -> Result<Option<PurchaseOrder>> {
        let row: Option<PurchaseOrderRow> = purchase_orders::table
            .filter(purchase_orders::id.eq(Some(id.0)))
            .first(conn)
            .optional()?;
        row.map(order_from_row).transpose()
    }

    fn load_orders(conn: &mut SqliteConnection, vendor: VendorId) -> Result<Vec<PurchaseOrder>> {
        let rows: Vec<PurchaseOrderRow> = purchase_orders::table
            .filter(purchase_orders::vendor_id.eq(vendor.0))
            .load(conn)?;
        rows.into_iter().map(order_from_row).collect()
    }

    fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i32> {
        let row: LastInsertRowId =
            diesel::sql_query("SELECT last_insert_rowid() AS id").get_result(conn)?;
        Ok(row.id)
    }

    /// The recalculation trigger: rescan the vendor's full order set, write
    /// the four metrics onto the vendor row, and append one snapshot.
    ///
    /// Must run inside the same transaction as the order write that caused
    /// it; if any step fails the whole write rolls back, so a committed
    /// order always has matching vendor metrics and a history row.
    fn recalculate_vendor(
        conn: &mut SqliteConnection,
        vendor: VendorId,
        reference_delivery: DateTime<Utc>,
    ) -> Result<PerformanceMetrics> {
        let orders = Self::load_orders(conn, vendor)?;
        let computed = metrics::recalculate(&orders, reference_delivery);

        diesel::update(vendors::table.filter(vendors::id.eq(Some(vendor.0))))
            .set((
                vendors::on_time_delivery_rate.eq(computed.on_time_delivery_rate),
                vendors::quality_rating_avg.eq(computed.quality_rating_avg),
                vendors::average_response_time.eq(computed.average_response_time),
                vendors::fulfillment_rate.eq(computed.fulfillment_rate),
            ))
            .execute(conn)?;

        diesel::insert_into(performance_history::table)
            .values(&NewSnapshotRow {
                vendor_id: vendor.0,
                recorded_at: Utc::now().to_rfc3339(),
                on_time_delivery_rate: computed.on_time_delivery_rate,
                quality_rating_avg: computed.quality_rating_avg,
                average_response_time: computed.average_response_time,
                fulfillment_rate: computed.fulfillment_rate,
            })
            .execute(conn)?;

        Ok(computed)
    }
}

impl VendorStore for SqliteStore {
    async fn create_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        let mut conn = self.conn()?;
        let id = conn.transaction::<_, Error, _>(|conn| {
            diesel::insert_into(vendors::table)
                .values(&NewVendorRow {
                    name: draft.name.clone(),
                    contact_details: draft.contact_details.clone(),
                    address: draft.address.clone(),
                    vendor_code: draft.vendor_code.clone(),
                    on_time_delivery_rate: 0.0,
                    quality_rating_avg: 0.0,
                    average_response_time: 0.0,
                    fulfillment_rate: 0.0,
                })
                .execute(conn)?;
            Self::last_insert_rowid(conn)
        })?;

        tracing::debug!(vendor_id = id, vendor_code = %draft.vendor_code, "Created vendor");
        Self::require_vendor(&mut conn, VendorId(id))
    }

    async fn get_vendor(&self, id: VendorId) -> Result<Option<Vendor>> {
        let mut conn = self.conn()?;
        Self::load_vendor(&mut conn, id)
    }

    async fn find_vendor_by_code(&self, code: &str) -> Result<Option<Vendor>> {
        let mut conn = self.conn()?;
        let row: Option<VendorRow> = vendors::table
            .filter(vendors::vendor_code.eq(code))
            .first(&mut conn)
            .optional()?;
        row.map(vendor_from_row).transpose()
    }

    async fn list_vendors(&self) -> Result<Vec<Vendor>> {
        let mut conn = self.conn()?;
        let rows: Vec<VendorRow> = vendors::table.order(vendors::id.asc()).load(&mut conn)?;
        rows.into_iter().map(vendor_from_row).collect()
    }

    async fn update_vendor(&self, id: VendorId, draft: &VendorDraft) -> Result<Vendor> {
        let mut conn = self.conn()?;
        let updated = diesel::update(vendors::table.filter(vendors::id.eq(Some(id.0))))
            .set((
                vendors::name.eq(&draft.name),
                vendors::contact_details.eq(&draft.contact_details),
                vendors::address.eq(&draft.address),
                vendors::vendor_code.eq(&draft.vendor_code),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(Error::NotFound {
                entity: "vendor",
                id: id.to_string(),
            });
        }
        Self::require_vendor(&mut conn, id)
    }

    async fn delete_vendor(&self, id: VendorId) -> Result<bool> {
        let mut conn = self.conn()?;
        // foreign_keys pragma is on, so orders and snapshots cascade.
        let deleted = diesel::delete(vendors::table.filter(vendors::id.eq(Some(id.0))))
            .execute(&mut conn)?;
        Ok(deleted > 0)
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<PurchaseOrder> {
        let row = Self::order_row(draft)?;
        let mut conn = self.conn()?;

        let id = conn.transaction::<_, Error, _>(|conn| {
            Self::require_vendor(conn, draft.vendor_id)?;
            diesel::insert_into(purchase_orders::table)
                .values(&row)
                .execute(conn)?;
            let id = Self::last_insert_rowid(conn)?;
            let computed =
                Self::recalculate_vendor(conn, draft.vendor_id, draft.delivery_date)?;
            tracing::debug!(
                po_number = %draft.po_number,
                vendor_id = draft.vendor_id.0,
                fulfillment_rate = computed.fulfillment_rate,
                "Created purchase order and recalculated metrics"
            );
            Ok(id)
        })?;

        Self::load_order(&mut conn, PurchaseOrderId(id))?.ok_or(Error::NotFound {
            entity: "purchase order",
            id: id.to_string(),
        })
    }

    async fn get_order(&self, id: PurchaseOrderId) -> Result<Option<PurchaseOrder>> {
        let mut conn = self.conn()?;
        Self::load_order(&mut conn, id)
    }

    async fn list_orders(&self, vendor: Option<VendorId>) -> Result<Vec<PurchaseOrder>> {
        let mut conn = self.conn()?;
        let rows: Vec<PurchaseOrderRow> = match vendor {
            Some(v) => purchase_orders::table
                .filter(purchase_orders::vendor_id.eq(v.0))
                .order(purchase_orders::id.asc())
                .load(&mut conn)?,
            None => purchase_orders::table
                .order(purchase_orders::id.asc())
                .load(&mut conn)?,
        };
        rows.into_iter().map(order_from_row).collect()
    }

    async fn update_order(&self, id: PurchaseOrderId, draft: &OrderDraft) -> Result<PurchaseOrder> {
        let row = Self::order_row(draft)?;
        let mut conn = self.conn()?;

        conn.transaction::<_, Error, _>(|conn| {
            let updated =
                diesel::update(purchase_orders::table.filter(purchase_orders::id.eq(Some(id.0))))
                    .set(&row)
                    .execute(conn)?;
            if updated == 0 {
                return Err(Error::NotFound {
                    entity: "purchase order",
                    id: id.to_string(),
                });
            }
            // Recalculate for the vendor the order now belongs to. If the
            // write moved the order between vendors, the previous vendor's
            // cached metrics keep their last computed value, matching the
            // delete behavior.
            let computed =
                Self::recalculate_vendor(conn, draft.vendor_id, draft.delivery_date)?;
            tracing::debug!(
                order_id = id.0,
                vendor_id = draft.vendor_id.0,
                fulfillment_rate = computed.fulfillment_rate,
                "Updated purchase order and recalculated metrics"
            );
            Ok(())
        })?;

        Self::load_order(&mut conn, id)?.ok_or(Error::NotFound {
            entity: "purchase order",
            id: id.to_string(),
        })
    }

    async fn delete_order(&self, id: PurchaseOrderId) -> Result<bool> {
        let mut conn = self.conn()?;
        let recalculate = self.recalculation.on_delete;

        conn.transaction::<_, Error, _>(|conn| {
            let row: Option<PurchaseOrderRow> = purchase_orders::table
                .filter(purchase_orders::id.eq(Some(id.0)))
                .first(conn)
                .optional()?;
            let Some(row) = row else {
                return Ok(false);
            };
            let vendor = VendorId(row.vendor_id);

            diesel::delete(purchase_orders::table.filter(purchase_orders::id.eq(Some(id.0))))
                .execute(conn)?;

            if recalculate {
                // There is no triggering order on the delete path; the
                // latest remaining delivery date stands in as the on-time
                // reference. Metrics drop to zero with the last order.
                let remaining = Self::load_orders(conn, vendor)?;
                let reference = remaining
                    .iter()
                    .map(|o| o.delivery_date)
                    .max()
                    .unwrap_or_else(Utc::now);
                Self::recalculate_vendor(conn, vendor, reference)?;
                tracing::debug!(order_id = id.0, vendor_id = vendor.0, "Recalculated after delete");
            }
            Ok(true)
        })
    }

    async fn orders_for_vendor(&self, vendor: VendorId) -> Result<Vec<PurchaseOrder>> {
        let mut conn = self.conn()?;
        Self::load_orders(&mut conn, vendor)
    }

    async fn performance(&self, vendor: VendorId) -> Result<PerformanceMetrics> {
        let mut conn = self.conn()?;
        Ok(Self::require_vendor(&mut conn, vendor)?.performance())
    }

    async fn history_for_vendor(&self, vendor: VendorId) -> Result<Vec<PerformanceSnapshot>> {
        let mut conn = self.conn()?;
        let rows: Vec<SnapshotRow> = performance_history::table
            .filter(performance_history::vendor_id.eq(vendor.0))
            .order((
                performance_history::recorded_at.desc(),
                performance_history::id.desc(),
            ))
            .load(&mut conn)?;
        rows.into_iter().map(snapshot_from_row).collect()
    }
}
