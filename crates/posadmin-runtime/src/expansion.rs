//! Lazily loaded order line items.
//!
//! Items are fetched the first time a row is expanded and kept until the
//! order list itself is reloaded. Collapsing only hides them.

use posadmin_client::ApiClient;
use posadmin_types::{OrderId, OrderItem};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    /// Items never fetched, or the last fetch failed
    Collapsed,
    Loading,
    /// Items cached; stays here until [`OrderExpansion::reset`]
    Loaded,
}

#[derive(Debug, Default)]
pub struct OrderExpansion {
    cache: HashMap<OrderId, Vec<OrderItem>>,
    loading: HashSet<OrderId>,
    open: HashSet<OrderId>,
}

impl OrderExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: OrderId) -> ExpansionState {
        if self.cache.contains_key(&id) {
            ExpansionState::Loaded
        } else if self.loading.contains(&id) {
            ExpansionState::Loading
        } else {
            ExpansionState::Collapsed
        }
    }

    /// Whether the row is currently shown expanded
    pub fn is_open(&self, id: OrderId) -> bool {
        self.open.contains(&id) && self.cache.contains_key(&id)
    }

    pub fn items(&self, id: OrderId) -> Option<&[OrderItem]> {
        self.cache.get(&id).map(Vec::as_slice)
    }

    /// Expand a row, fetching its items only if they are not cached yet.
    ///
    /// A failed or abandoned fetch leaves the row collapsed so expanding
    /// again retries.
    pub async fn expand(&mut self, api: &ApiClient, id: OrderId) -> Result<&[OrderItem]> {
        if !self.cache.contains_key(&id) {
            let pending = Pending::start(&mut self.loading, id);
            debug!(order = %id, "fetching order items");
            let result = api.orders().items(id).await;
            drop(pending);
            self.cache.insert(id, result?);
        }
        self.open.insert(id);
        Ok(self.items(id).unwrap_or_default())
    }

    /// Hide a row's items. The cache is kept.
    pub fn collapse(&mut self, id: OrderId) {
        self.open.remove(&id);
    }

    /// Discard everything; called whenever the order list reloads
    pub fn reset(&mut self) {
        self.cache.clear();
        self.loading.clear();
        self.open.clear();
    }
}

/// Marks an order as loading until dropped, including when the fetch
/// future is dropped before it completes
struct Pending<'a> {
    loading: &'a mut HashSet<OrderId>,
    id: OrderId,
}

impl<'a> Pending<'a> {
    fn start(loading: &'a mut HashSet<OrderId>, id: OrderId) -> Self {
        loading.insert(id);
        Self { loading, id }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.loading.remove(&self.id);
    }
}
