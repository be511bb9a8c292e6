mod client;
mod ids;
mod inventory;
mod order;
mod product;
mod report;
mod session;

pub use client::{Client, ClientForm};
pub use ids::{ClientId, OrderId, OrderItemId, ProductId};
pub use inventory::{Inventory, InventoryUpdate};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus};
pub use product::{Product, ProductForm};
pub use report::{DaySalesRow, SalesReportRow};
pub use session::SessionInfo;

/// A record that can be located inside a loaded page by its key.
///
/// Used to patch a single row in place from a mutation response.
pub trait Keyed {
    type Key: Clone + Eq + std::hash::Hash + std::fmt::Display;

    fn key(&self) -> Self::Key;
}
