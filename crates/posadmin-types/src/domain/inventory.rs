use serde::{Deserialize, Serialize};

use super::{Keyed, ProductId};

/// Stock level of one product. Keyed 1:1 by product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
}

impl Keyed for Inventory {
    type Key = ProductId;

    fn key(&self) -> ProductId {
        self.product_id
    }
}

/// Body for `PUT /inventory/{productId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub quantity: i64,
}
