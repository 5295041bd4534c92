//! Database model types for Diesel ORM.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{performance_history, purchase_orders, vendors};
use crate::domain::{
    LineItem, PerformanceSnapshot, PurchaseOrder, PurchaseOrderId, Vendor, VendorId,
};
use crate::error::{Error, Result};

/// Database row for a vendor.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = vendors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VendorRow {
    pub id: Option<i32>,
    pub name: String,
    pub contact_details: String,
    pub address: String,
    pub vendor_code: String,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

/// Database row for a vendor (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = vendors)]
pub struct NewVendorRow {
    pub name: String,
    pub contact_details: String,
    pub address: String,
    pub vendor_code: String,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

/// Database row for a purchase order.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = purchase_orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PurchaseOrderRow {
    pub id: Option<i32>,
    pub po_number: String,
    pub vendor_id: i32,
    pub order_date: String,
    pub delivery_date: String,
    pub items: String,
    pub quantity: i32,
    pub status: String,
    pub quality_rating: Option<f64>,
    pub issue_date: String,
    pub acknowledgment_date: Option<String>,
}

/// Database row for a purchase order (insertable).
///
/// Updates replace the full field set, so a `None` rating or
/// acknowledgment clears the stored value instead of keeping it.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = purchase_orders)]
#[diesel(treat_none_as_null = true)]
pub struct NewPurchaseOrderRow {
    pub po_number: String,
    pub vendor_id: i32,
    pub order_date: String,
    pub delivery_date: String,
    pub items: String,
    pub quantity: i32,
    pub status: String,
    pub quality_rating: Option<f64>,
    pub issue_date: String,
    pub acknowledgment_date: Option<String>,
}

/// Database row for a performance snapshot.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = performance_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotRow {
    pub id: Option<i32>,
    pub vendor_id: i32,
    pub recorded_at: String,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

/// Database row for a performance snapshot (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = performance_history)]
pub struct NewSnapshotRow {
    pub vendor_id: i32,
    pub recorded_at: String,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}

pub fn vendor_from_row(row: VendorRow) -> Result<Vendor> {
    let id = row
        .id
        .ok_or_else(|| Error::Database("vendor row without id".into()))?;
    Ok(Vendor {
        id: VendorId(id),
        name: row.name,
        contact_details: row.contact_details,
        address: row.address,
        vendor_code: row.vendor_code,
        on_time_delivery_rate: row.on_time_delivery_rate,
        quality_rating_avg: row.quality_rating_avg,
        average_response_time: row.average_response_time,
        fulfillment_rate: row.fulfillment_rate,
    })
}

pub fn order_from_row(row: PurchaseOrderRow) -> Result<PurchaseOrder> {
    let id = row
        .id
        .ok_or_else(|| Error::Database("purchase order row without id".into()))?;
    let items: Vec<LineItem> =
        serde_json::from_str(&row.items).map_err(|e| Error::Parse(e.to_string()))?;
    Ok(PurchaseOrder {
        id: PurchaseOrderId(id),
        po_number: row.po_number,
        vendor_id: VendorId(row.vendor_id),
        order_date: parse_datetime(&row.order_date)?,
        delivery_date: parse_datetime(&row.delivery_date)?,
        items,
        quantity: row.quantity,
        status: row.status,
        quality_rating: row.quality_rating,
        issue_date: parse_datetime(&row.issue_date)?,
        acknowledgment_date: row
            .acknowledgment_date
            .as_deref()
            .map(parse_datetime)
            .transpose()?,
    })
}

pub fn snapshot_from_row(row: SnapshotRow) -> Result<PerformanceSnapshot> {
    let id = row
        .id
        .ok_or_else(|| Error::Database("snapshot row without id".into()))?;
    Ok(PerformanceSnapshot {
        id,
        vendor_id: VendorId(row.vendor_id),
        recorded_at: parse_datetime(&row.recorded_at)?,
        on_time_delivery_rate: row.on_time_delivery_rate,
        quality_rating_avg: row.quality_rating_avg,
        average_response_time: row.average_response_time,
        fulfillment_rate: row.fulfillment_rate,
    })
}
