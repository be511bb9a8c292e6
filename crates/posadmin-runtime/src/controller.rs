//! Paged list state for one screen.
//!
//! Every load carries a [`LoadTicket`] stamped with the controller's
//! generation. Any filter or page change bumps the generation, so a
//! response that arrives after a newer request was issued is dropped
//! instead of overwriting fresher state.

use posadmin_types::{Keyed, LocalFilter, Page, PageRequest, clamp_page, page_count};
use tracing::{debug, warn};

use crate::Result;
use crate::source::PagedSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// A snapshot of the request a load was issued for.
#[derive(Debug, Clone)]
pub struct LoadTicket<F> {
    generation: u64,
    filter: F,
    request: PageRequest,
}

impl<F> LoadTicket<F> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }
}

/// What [`ListController::apply`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Rows and total replaced
    Loaded,
    /// Response belonged to an older request and was ignored
    Stale,
    /// The page was past the end of a shrunken result; the page index moved
    /// back to the last valid page and needs loading
    Clamped { page: usize },
}

pub struct ListController<S: PagedSource> {
    source: S,
    filter: S::Filter,
    page: usize,
    page_size: usize,
    rows: Vec<S::Item>,
    total: usize,
    state: LoadState,
    generation: u64,
}

impl<S: PagedSource> ListController<S> {
    pub fn new(source: S, page_size: usize) -> Result<Self> {
        PageRequest::new(0, page_size)?;
        Ok(Self {
            source,
            filter: S::Filter::default(),
            page: 0,
            page_size,
            rows: Vec::new(),
            total: 0,
            state: LoadState::Idle,
            generation: 0,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn filter(&self) -> &S::Filter {
        &self.filter
    }

    pub fn rows(&self) -> &[S::Item] {
        &self.rows
    }

    /// Records matching the filter, not the size of the whole table
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Replace the filter. The page index goes back to the first page.
    pub fn set_filter(&mut self, filter: S::Filter) {
        self.filter = filter;
        self.page = 0;
        self.generation += 1;
    }

    /// Jump to a page. Pages past the end are accepted and load as empty.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.generation += 1;
    }

    /// Advance one page; returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 >= self.page_count() {
            return false;
        }
        self.set_page(self.page + 1);
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.set_page(self.page - 1);
        true
    }

    /// Start a load for the current (filter, page). Older tickets become stale.
    pub fn begin_load(&mut self) -> LoadTicket<S::Filter> {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.generation,
            filter: self.filter.clone(),
            request: PageRequest {
                page: self.page,
                page_size: self.page_size,
            },
        }
    }

    /// Fetch the page a ticket describes. Does not touch controller state.
    pub async fn fetch(&self, ticket: &LoadTicket<S::Filter>) -> Result<Page<S::Item>> {
        self.source.fetch(&ticket.filter, ticket.request).await
    }

    /// Store the outcome of a load.
    ///
    /// Stale tickets are ignored whatever the result. A failure clears the
    /// rows and is returned to the caller.
    pub fn apply(
        &mut self,
        ticket: LoadTicket<S::Filter>,
        result: Result<Page<S::Item>>,
    ) -> Result<Applied> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale page response"
            );
            return Ok(Applied::Stale);
        }

        match result {
            Ok(mut page) => {
                page.rows.truncate(self.page_size);
                self.rows = page.rows;
                self.total = page.total;
                self.state = LoadState::Loaded;

                let last_valid = clamp_page(self.page, self.total, self.page_size);
                if self.rows.is_empty() && last_valid < self.page {
                    debug!(from = self.page, to = last_valid, "page past end, clamping");
                    self.page = last_valid;
                    self.generation += 1;
                    return Ok(Applied::Clamped { page: last_valid });
                }
                Ok(Applied::Loaded)
            }
            Err(e) => {
                self.rows.clear();
                self.total = 0;
                self.state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Load the current page; follows one clamp back to the last valid page.
    pub async fn load(&mut self) -> Result<Applied> {
        let outcome = self.load_once().await?;
        if let Applied::Clamped { .. } = outcome {
            return self.load_once().await;
        }
        Ok(outcome)
    }

    async fn load_once(&mut self) -> Result<Applied> {
        let ticket = self.begin_load();
        let result = self.fetch(&ticket).await;
        self.apply(ticket, result)
    }

    /// Replace the loaded row with the same key. Returns whether it was on
    /// the current page; the source sees the update either way.
    pub fn patch(&mut self, item: &S::Item) -> bool {
        self.source.patch(item);
        let key = item.key();
        match self.rows.iter_mut().find(|row| row.key() == key) {
            Some(row) => {
                *row = item.clone();
                true
            }
            None => false,
        }
    }

    /// Whether a record belongs under the current filter
    pub fn admits(&self, item: &S::Item) -> bool {
        self.filter.matches(item)
    }

    /// Fold a mutation the server already accepted into the page.
    ///
    /// A returned entity is patched in place, and the page is rebuilt when
    /// the entity no longer matches the filter. Without one the page is
    /// reloaded. A failed rebuild stays in [`LoadState::Failed`].
    pub async fn absorb(&mut self, returned: Option<S::Item>) {
        match returned {
            Some(item) => {
                self.patch(&item);
                if !self.admits(&item) {
                    debug!("patched record left the filter, rebuilding page");
                    self.settle().await;
                }
            }
            None => self.refresh().await,
        }
    }

    /// Drop cached data; in-flight loads become stale.
    pub fn invalidate(&mut self) {
        self.source.invalidate();
        self.generation += 1;
    }

    /// Invalidate and load the current page again after a mutation the
    /// server accepted. A failure is logged and kept in
    /// [`LoadState::Failed`], never returned.
    pub async fn refresh(&mut self) {
        self.invalidate();
        self.settle().await;
    }

    async fn settle(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "reload after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ClientPages, FetchAllSource, OrderPages, RemotePagedSource};
    use posadmin_client::Method;
    use posadmin_testing::assertions::assert_page_within;
    use posadmin_testing::{Connection, FakeBackend, fixtures};
    use posadmin_types::{ClientFilter, OrderFilter, OrderStatus};
    use std::sync::Arc;

    type ClientList = ListController<FetchAllSource<ClientPages, ClientFilter>>;

    fn clients_controller(backend: &Arc<FakeBackend>) -> ClientList {
        let conn = Connection::admin(backend);
        let source = FetchAllSource::new(conn.api, ClientPages, 100).unwrap();
        ListController::new(source, 10).unwrap()
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let backend = Arc::new(FakeBackend::new());
        let conn = Connection::admin(&backend);
        let source = RemotePagedSource::new(conn.api, OrderPages);
        assert!(ListController::new(source, 0).is_err());
    }

    #[tokio::test]
    async fn test_250_clients_paginate_into_25_pages() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(250)));
        let mut list = clients_controller(&backend);

        list.load().await.unwrap();

        assert_eq!(list.total(), 250);
        assert_eq!(list.page_count(), 25);
        assert_eq!(list.rows().len(), 10);
        assert_eq!(list.state(), &LoadState::Loaded);
        assert_eq!(backend.count(Method::Get, "/clients"), 3);

        while list.next_page() {
            list.load().await.unwrap();
            assert_page_within(list.rows(), 10).unwrap();
        }
        assert_eq!(list.page(), 24);
        assert_eq!(backend.count(Method::Get, "/clients"), 3);
    }

    #[tokio::test]
    async fn test_search_returns_substring_subset_and_resets_page() {
        let mut clients = fixtures::clients(40);
        clients.push(fixtures::client(41, "Acme Retail"));
        clients.push(fixtures::client(42, "ACME wholesale"));
        let backend = Arc::new(FakeBackend::new().with_clients(clients));
        let mut list = clients_controller(&backend);

        list.set_page(3);
        list.load().await.unwrap();
        assert_eq!(list.page(), 3);

        list.set_filter(ClientFilter::search("acme"));
        assert_eq!(list.page(), 0);
        list.load().await.unwrap();

        let names: Vec<&str> = list.rows().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Retail", "ACME wholesale"]);
        assert_eq!(list.total(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_is_loaded_not_failed() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(5)));
        let mut list = clients_controller(&backend);

        list.set_filter(ClientFilter::search("no such client"));
        list.load().await.unwrap();

        assert!(list.rows().is_empty());
        assert_eq!(list.total(), 0);
        assert_eq!(list.page_count(), 0);
        assert_eq!(list.state(), &LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(30)));
        let mut list = clients_controller(&backend);

        let old = list.begin_load();
        list.set_page(2);
        let new = list.begin_load();

        let old_result = list.fetch(&old).await;
        let new_result = list.fetch(&new).await;

        // The newer response lands first, the older one afterwards
        assert_eq!(list.apply(new, new_result).unwrap(), Applied::Loaded);
        assert_eq!(list.apply(old, old_result).unwrap(), Applied::Stale);

        assert_eq!(list.page(), 2);
        assert_eq!(list.rows()[0].name, "Client 021");
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_clear_rows() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(5)));
        let mut list = clients_controller(&backend);

        let old = list.begin_load();
        let new = list.begin_load();
        let new_result = list.fetch(&new).await;
        list.apply(new, new_result).unwrap();

        let failure = Err(crate::Error::InvalidOperation("late failure".into()));
        assert_eq!(list.apply(old, failure).unwrap(), Applied::Stale);
        assert_eq!(list.rows().len(), 5);
        assert_eq!(list.state(), &LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_page_beyond_end_clamps_to_last_page() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(25)));
        let mut list = clients_controller(&backend);

        list.set_page(7);
        let ticket = list.begin_load();
        let result = list.fetch(&ticket).await;
        let page = result.as_ref().unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total, 25);

        assert_eq!(
            list.apply(ticket, result).unwrap(),
            Applied::Clamped { page: 2 }
        );
        assert!(list.rows().is_empty());
        assert_eq!(list.state(), &LoadState::Loaded);

        list.load().await.unwrap();
        assert_eq!(list.page(), 2);
        assert_eq!(list.rows().len(), 5);
    }

    #[tokio::test]
    async fn test_load_follows_clamp_when_total_shrinks() {
        let orders: Vec<_> = (1..=25)
            .map(|id| {
                fixtures::order(id, 1, OrderStatus::Created, fixtures::timestamp(2024, 3, 1))
            })
            .collect();
        let backend = Arc::new(
            FakeBackend::new()
                .with_clients(fixtures::clients(1))
                .with_orders(orders),
        );
        let conn = Connection::admin(&backend);
        let mut list =
            ListController::new(RemotePagedSource::new(conn.api, OrderPages), 10).unwrap();

        list.set_page(2);
        list.load().await.unwrap();
        assert_eq!(list.rows().len(), 5);

        list.set_filter(OrderFilter {
            status: Some(OrderStatus::Invoiced),
            ..Default::default()
        });
        list.set_page(4);
        let outcome = list.load().await.unwrap();

        assert_eq!(outcome, Applied::Loaded);
        assert_eq!(list.page(), 0);
        assert_eq!(list.total(), 0);
        assert!(list.rows().is_empty());
    }

    #[tokio::test]
    async fn test_failure_clears_rows() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(5)));
        let mut list = clients_controller(&backend);
        list.load().await.unwrap();

        backend.set_offline(true);
        list.invalidate();
        let err = list.load().await.unwrap_err();

        assert!(err.to_string().starts_with("Backend unreachable"));
        assert!(list.rows().is_empty());
        assert!(matches!(list.state(), LoadState::Failed(msg) if msg.starts_with("Backend")));
    }

    #[tokio::test]
    async fn test_toggle_twice_round_trips() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(3)));
        let mut list = clients_controller(&backend);
        let conn = Connection::admin(&backend);
        list.load().await.unwrap();
        let before = list.rows().to_vec();

        for _ in 0..2 {
            let returned = conn
                .api
                .clients()
                .toggle(before[1].id)
                .await
                .unwrap();
            list.absorb(returned).await;
        }

        assert_eq!(list.rows(), before.as_slice());
        assert_eq!(backend.count(Method::Get, "/clients"), 1);
        assert_eq!(list.source().cached().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_absorb_without_entity_reloads() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(3)));
        let mut list = clients_controller(&backend);
        list.load().await.unwrap();

        list.absorb(None).await;

        assert_eq!(backend.count(Method::Get, "/clients"), 2);
        assert_eq!(list.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_rename_out_of_search_rebuilds_page_from_memory() {
        let mut clients = fixtures::clients(40);
        clients.push(fixtures::client(41, "Acme Retail"));
        clients.push(fixtures::client(42, "ACME wholesale"));
        let backend = Arc::new(FakeBackend::new().with_clients(clients));
        let mut list = clients_controller(&backend);
        list.set_filter(ClientFilter::search("acme"));
        list.load().await.unwrap();
        assert_eq!(list.total(), 2);

        let renamed = Connection::admin(&backend)
            .api
            .clients()
            .update(
                posadmin_types::ClientId::new(41),
                &posadmin_types::ClientForm {
                    name: "Initech".to_string(),
                },
            )
            .await
            .unwrap();
        list.absorb(renamed).await;

        let names: Vec<&str> = list.rows().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ACME wholesale"]);
        assert_eq!(list.total(), 1);
        assert_eq!(list.state(), &LoadState::Loaded);
        assert_eq!(backend.count(Method::Get, "/clients"), 1);
    }

    #[tokio::test]
    async fn test_status_change_out_of_filter_reloads_remote_page() {
        let orders: Vec<_> = (1..=3)
            .map(|id| {
                fixtures::order(id, 1, OrderStatus::Created, fixtures::timestamp(2024, 3, 1))
            })
            .collect();
        let backend = Arc::new(
            FakeBackend::new()
                .with_clients(fixtures::clients(1))
                .with_orders(orders),
        );
        let conn = Connection::admin(&backend);
        let mut list =
            ListController::new(RemotePagedSource::new(conn.api.clone(), OrderPages), 10)
                .unwrap();
        list.set_filter(OrderFilter {
            status: Some(OrderStatus::Created),
            ..Default::default()
        });
        list.load().await.unwrap();

        let invoiced = conn
            .api
            .orders()
            .invoice(posadmin_types::OrderId::new(2))
            .await
            .unwrap();
        list.absorb(invoiced).await;

        assert!(list.rows().iter().all(|o| o.status == OrderStatus::Created));
        assert_eq!(list.rows().len(), 2);
        assert_eq!(list.total(), 2);
        assert_eq!(backend.count(Method::Get, "/orders"), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_stays_in_state() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(3)));
        let mut list = clients_controller(&backend);
        list.load().await.unwrap();

        backend.fail_next(Method::Get, "/clients", 500);
        list.refresh().await;

        assert!(matches!(list.state(), LoadState::Failed(_)));
        assert!(list.rows().is_empty());

        list.refresh().await;
        assert_eq!(list.state(), &LoadState::Loaded);
        assert_eq!(list.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_next_and_prev_page_bounds() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(15)));
        let mut list = clients_controller(&backend);
        list.load().await.unwrap();

        assert!(!list.prev_page());
        assert!(list.next_page());
        assert!(!list.next_page());
        assert_eq!(list.page(), 1);
        assert!(list.prev_page());
        assert_eq!(list.page(), 0);
    }
}
