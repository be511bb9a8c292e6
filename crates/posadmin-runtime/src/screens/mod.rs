//! One controller per console screen.
//!
//! Each screen owns a [`ListController`](crate::ListController) plus the
//! lookups it renders with. Mutations go through the API and are folded
//! back into the loaded page: patched from the returned entity when there is
//! one, reloaded otherwise. A failed mutation leaves the page untouched.

mod clients;
mod inventory;
mod orders;
mod products;

pub use clients::{ClientList, ClientsScreen};
pub use inventory::{InventoryList, InventoryScreen};
pub use orders::{OrderList, OrdersScreen};
pub use products::{ProductList, ProductsScreen};
