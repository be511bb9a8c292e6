use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ClientId, Keyed, OrderId, OrderItemId, ProductId};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Invoiced,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Invoiced => "INVOICED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Only freshly created orders can be invoiced or cancelled.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Created)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(OrderStatus::Created),
            "INVOICED" => Ok(OrderStatus::Invoiced),
            "CANCELLED" | "CANCELED" => Ok(OrderStatus::Cancelled),
            other => Err(Error::InvalidInput(format!(
                "unknown order status '{}' (expected CREATED, INVOICED or CANCELLED)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub client_id: ClientId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Line items are fetched lazily through `GET /orders/{id}/items`;
    /// list responses usually leave this empty.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Keyed for Order {
    type Key = OrderId;

    fn key(&self) -> OrderId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub selling_price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.selling_price
    }
}

/// Body for `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub client_id: ClientId,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub selling_price: f64,
}

impl FromStr for NewOrderItem {
    type Err = Error;

    /// Parses `productId:quantity:sellingPrice`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [product_id, quantity, price] = parts.as_slice() else {
            return Err(Error::InvalidInput(format!(
                "order item '{}' must look like productId:quantity:sellingPrice",
                s
            )));
        };

        let quantity = quantity
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| Error::InvalidInput(format!("invalid quantity in '{}'", s)))?;
        let selling_price = price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| Error::InvalidInput(format!("invalid selling price in '{}'", s)))?;

        Ok(NewOrderItem {
            product_id: product_id.parse()?,
            quantity,
            selling_price,
        })
    }
}
