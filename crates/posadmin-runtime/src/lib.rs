//! Headless state behind every list screen of the console.
//!
//! A [`ListController`] owns the (filter, page, rows, total) tuple of one
//! screen and talks to the backend through a [`PagedSource`]. The screens in
//! [`screens`] combine a controller with the lookups and caches that screen
//! needs and apply mutation results back into the loaded page.

pub mod controller;
pub mod error;
pub mod expansion;
pub mod lookup;
pub mod screens;
pub mod source;

pub use controller::{Applied, ListController, LoadState, LoadTicket};
pub use error::{Error, Result};
pub use expansion::{ExpansionState, OrderExpansion};
pub use lookup::LookupJoin;
pub use screens::{
    ClientList, ClientsScreen, InventoryList, InventoryScreen, OrderList, OrdersScreen,
    ProductList, ProductsScreen,
};
pub use source::{
    ChunkedCollection, ClientPages, FetchAllSource, InventoryPages, OrderPages, PagedSource,
    ProductPages, RemoteCollection, RemotePagedSource,
};
