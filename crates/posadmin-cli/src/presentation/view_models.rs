//! What the console shows, independent of how it is printed.
//!
//! Every view model serializes as-is for `--format json` and implements
//! `Display` (in `views`) for plain output.

use chrono::{DateTime, NaiveDate, Utc};
use posadmin_types::{ClientId, OrderId, OrderItemId, OrderStatus, ProductId};
use serde::Serialize;
use std::path::PathBuf;

/// One page of a list screen
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewModel<T> {
    pub rows: Vec<T>,
    /// 1-based
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total: usize,
    #[serde(skip)]
    pub noun: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRowViewModel {
    pub id: ClientId,
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRowViewModel {
    pub id: ProductId,
    pub name: String,
    pub barcode: String,
    pub mrp: f64,
    pub client_id: ClientId,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRowViewModel {
    pub product_id: ProductId,
    pub product_name: String,
    pub barcode: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRowViewModel {
    pub id: OrderId,
    pub client_id: ClientId,
    pub client_name: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Present only when the row was expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItemViewModel>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemViewModel {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub selling_price: f64,
    pub line_total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemsViewModel {
    pub order_id: OrderId,
    pub items: Vec<OrderItemViewModel>,
    pub total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportRowViewModel {
    pub product_name: String,
    pub client_name: String,
    pub quantity: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySalesRowViewModel {
    pub date: NaiveDate,
    pub invoiced_orders_count: i64,
    pub invoiced_items_count: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportViewModel<T> {
    pub rows: Vec<T>,
    #[serde(skip)]
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionViewModel {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Outcome of a create/update/toggle/transition
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationViewModel<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadViewModel {
    pub file: PathBuf,
    pub imported: usize,
}

/// A file written to disk (invoice PDF, report export)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWrittenViewModel {
    pub path: PathBuf,
    pub bytes: usize,
}
