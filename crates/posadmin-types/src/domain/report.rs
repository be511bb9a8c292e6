use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of `POST /reports/sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportRow {
    pub product_name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    pub quantity: i64,
    pub revenue: f64,
}

/// One row of `POST /reports/day-sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySalesRow {
    pub date: NaiveDate,
    pub invoiced_orders_count: i64,
    pub invoiced_items_count: i64,
    pub total_revenue: f64,
}
