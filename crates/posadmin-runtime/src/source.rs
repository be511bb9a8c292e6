//! Where a list screen gets its rows from.
//!
//! Products, inventory and orders are paged by the backend
//! ([`RemotePagedSource`]). Clients cannot be filtered server-side, so the
//! whole collection is pulled in fixed-size chunks once and filtered and
//! paged in memory ([`FetchAllSource`]).

use async_trait::async_trait;
use posadmin_client::ApiClient;
use posadmin_types::{
    Client, Inventory, InventoryFilter, Keyed, LocalFilter, Order, OrderFilter, Page, PageRequest,
    Product, ProductFilter,
};
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::Result;

#[async_trait]
pub trait PagedSource: Send + Sync {
    type Item: Keyed + Clone + Send + Sync;
    /// Also evaluated locally, to tell whether a patched record still
    /// belongs on the page
    type Filter: LocalFilter<Self::Item> + Clone + Default + Send + Sync;

    /// One page of records matching `filter`, plus the matching total.
    ///
    /// A page past the end is an empty row set, never an error.
    async fn fetch(&self, filter: &Self::Filter, page: PageRequest) -> Result<Page<Self::Item>>;

    /// Drop anything held in memory so the next fetch goes to the backend
    fn invalidate(&self) {}

    /// Replace a record held in memory with the server's copy
    fn patch(&self, _item: &Self::Item) {}
}

/// A backend collection that filters and pages on the server
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    type Item: Keyed + Clone + Send + Sync;
    type Filter: LocalFilter<Self::Item> + Clone + Default + Send + Sync;

    async fn fetch_page(
        &self,
        api: &ApiClient,
        filter: &Self::Filter,
        page: PageRequest,
    ) -> posadmin_client::Result<Page<Self::Item>>;
}

/// A backend collection that can only be read in unfiltered pages
#[async_trait]
pub trait ChunkedCollection: Send + Sync {
    type Item: Keyed + Clone + Send + Sync;

    async fn fetch_chunk(
        &self,
        api: &ApiClient,
        page: PageRequest,
    ) -> posadmin_client::Result<Page<Self::Item>>;
}

/// `POST /products/list`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductPages;

#[async_trait]
impl RemoteCollection for ProductPages {
    type Item = Product;
    type Filter = ProductFilter;

    async fn fetch_page(
        &self,
        api: &ApiClient,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> posadmin_client::Result<Page<Product>> {
        api.products().list(filter, page).await
    }
}

/// `POST /inventory/list`
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryPages;

#[async_trait]
impl RemoteCollection for InventoryPages {
    type Item = Inventory;
    type Filter = InventoryFilter;

    async fn fetch_page(
        &self,
        api: &ApiClient,
        filter: &InventoryFilter,
        page: PageRequest,
    ) -> posadmin_client::Result<Page<Inventory>> {
        api.inventory().list(filter, page).await
    }
}

/// `GET /orders?...`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderPages;

#[async_trait]
impl RemoteCollection for OrderPages {
    type Item = Order;
    type Filter = OrderFilter;

    async fn fetch_page(
        &self,
        api: &ApiClient,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> posadmin_client::Result<Page<Order>> {
        api.orders().list(filter, page).await
    }
}

/// `GET /clients?page=&pageSize=`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientPages;

#[async_trait]
impl ChunkedCollection for ClientPages {
    type Item = Client;

    async fn fetch_chunk(
        &self,
        api: &ApiClient,
        page: PageRequest,
    ) -> posadmin_client::Result<Page<Client>> {
        api.clients().page(page).await
    }
}

/// One backend request per (filter, page); the server's total is trusted.
pub struct RemotePagedSource<C> {
    api: ApiClient,
    collection: C,
}

impl<C: RemoteCollection> RemotePagedSource<C> {
    pub fn new(api: ApiClient, collection: C) -> Self {
        Self { api, collection }
    }
}

#[async_trait]
impl<C: RemoteCollection> PagedSource for RemotePagedSource<C> {
    type Item = C::Item;
    type Filter = C::Filter;

    async fn fetch(&self, filter: &C::Filter, page: PageRequest) -> Result<Page<C::Item>> {
        Ok(self.collection.fetch_page(&self.api, filter, page).await?)
    }
}

/// Pulls the whole collection once, then filters and pages in memory.
///
/// The cache lives until [`PagedSource::invalidate`]; mutations are folded
/// into it with [`PagedSource::patch`].
pub struct FetchAllSource<C: ChunkedCollection, F> {
    api: ApiClient,
    collection: C,
    chunk_size: usize,
    cache: Mutex<Option<Vec<C::Item>>>,
    _filter: PhantomData<fn(&F)>,
}

impl<C: ChunkedCollection, F> FetchAllSource<C, F> {
    pub fn new(api: ApiClient, collection: C, chunk_size: usize) -> Result<Self> {
        // Validates the chunk size up front
        PageRequest::new(0, chunk_size)?;
        Ok(Self {
            api,
            collection,
            chunk_size,
            cache: Mutex::new(None),
            _filter: PhantomData,
        })
    }

    /// Whether the full collection is currently held in memory
    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Snapshot of the cached collection
    pub fn cached(&self) -> Option<Vec<C::Item>> {
        self.lock().clone()
    }

    async fn load_all(&self) -> Result<Vec<C::Item>> {
        let mut items: Vec<C::Item> = Vec::new();
        let mut page = 0;
        loop {
            let chunk = self
                .collection
                .fetch_chunk(&self.api, PageRequest::new(page, self.chunk_size)?)
                .await?;
            let received = chunk.rows.len();
            let total = chunk.total;
            items.extend(chunk.rows);

            // Stop on a short chunk too, in case the total is overstated
            if items.len() >= total || received < self.chunk_size {
                break;
            }
            page += 1;
        }
        debug!(records = items.len(), chunks = page + 1, "collection loaded");
        Ok(items)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<C::Item>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<C, F> PagedSource for FetchAllSource<C, F>
where
    C: ChunkedCollection,
    F: LocalFilter<C::Item> + Clone + Default + Send + Sync,
{
    type Item = C::Item;
    type Filter = F;

    async fn fetch(&self, filter: &F, page: PageRequest) -> Result<Page<C::Item>> {
        let cached = self.lock().clone();
        let items = match cached {
            Some(items) => items,
            None => {
                let items = self.load_all().await?;
                *self.lock() = Some(items.clone());
                items
            }
        };

        let matching: Vec<C::Item> = items
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect();
        Ok(Page::slice(&matching, page))
    }

    fn invalidate(&self) {
        *self.lock() = None;
    }

    fn patch(&self, item: &C::Item) {
        if let Some(items) = self.lock().as_mut()
            && let Some(slot) = items.iter_mut().find(|i| i.key() == item.key())
        {
            *slot = item.clone();
        }
    }
}
