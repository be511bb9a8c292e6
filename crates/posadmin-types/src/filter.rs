//! Filter inputs for each list screen.
//!
//! Remote filters serialize straight into the list request body (or query
//! string for orders); `ClientFilter` is applied locally because the
//! backend cannot filter clients by name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Client, ClientId, Error, Inventory, Order, OrderStatus, Product, Result};

/// Predicate applied to records held in memory.
pub trait LocalFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

impl<T> LocalFilter<T> for () {
    fn matches(&self, _item: &T) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub search: String,
}

impl ClientFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
        }
    }
}

impl LocalFilter<Client> for ClientFilter {
    fn matches(&self, client: &Client) -> bool {
        let term = self.search.trim();
        term.is_empty()
            || client
                .name
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
}

impl LocalFilter<Product> for ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        text_matches(self.name.as_deref(), &product.name)
            && self
                .barcode
                .as_deref()
                .filter(|b| !b.is_empty())
                .is_none_or(|b| product.barcode == b)
            && self.client_id.is_none_or(|c| product.client_id == c)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// The barcode is resolved to a product on the server and is not part of
/// the row, so only the name is checked here.
impl LocalFilter<Inventory> for InventoryFilter {
    fn matches(&self, row: &Inventory) -> bool {
        text_matches(self.product_name.as_deref(), &row.product_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl OrderFilter {
    /// Query-string pairs for `GET /orders`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(client_id) = self.client_id {
            pairs.push(("clientId", client_id.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.to_string()));
        }
        pairs
    }

    pub fn validate(&self) -> Result<()> {
        validate_range(self.start_date, self.end_date)
    }
}

impl LocalFilter<Order> for OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        let day = order.created_at.date_naive();
        self.status.is_none_or(|s| order.status == s)
            && self.client_id.is_none_or(|c| order.client_id == c)
            && self.start_date.is_none_or(|start| day >= start)
            && self.end_date.is_none_or(|end| day <= end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
}

impl SalesReportFilter {
    pub fn validate(&self) -> Result<()> {
        validate_range(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySalesFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl DaySalesFilter {
    pub fn validate(&self) -> Result<()> {
        validate_range(self.start_date, self.end_date)
    }
}

/// Case-insensitive substring; an unset or blank term matches everything
fn text_matches(term: Option<&str>, value: &str) -> bool {
    match term.map(str::trim).filter(|t| !t.is_empty()) {
        Some(term) => value.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(Error::InvalidInput(format!(
            "start date {} is after end date {}",
            start, end
        ))),
        _ => Ok(()),
    }
}
