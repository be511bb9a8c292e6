use posadmin_client::{ApiClient, Config};
use posadmin_types::{
    Client, ClientId, NewOrder, Order, OrderFilter, OrderId, OrderItem, Product, ProductId,
};
use tracing::{info, warn};

use crate::Result;
use crate::controller::{Applied, ListController};
use crate::expansion::{ExpansionState, OrderExpansion};
use crate::lookup::LookupJoin;
use crate::source::{OrderPages, RemotePagedSource};

pub type OrderList = ListController<RemotePagedSource<OrderPages>>;

/// Orders page on the server. Line items are fetched per row on expand and
/// dropped whenever the list reloads.
pub struct OrdersScreen {
    api: ApiClient,
    list: OrderList,
    expansion: OrderExpansion,
    clients: LookupJoin<ClientId, Client>,
    products: LookupJoin<ProductId, Product>,
}

impl OrdersScreen {
    pub fn new(api: ApiClient, config: &Config) -> Result<Self> {
        let source = RemotePagedSource::new(api.clone(), OrderPages);
        Ok(Self {
            list: ListController::new(source, config.page_size)?,
            expansion: OrderExpansion::new(),
            clients: LookupJoin::client_names(),
            products: LookupJoin::product_names(),
            api,
        })
    }

    pub fn list(&self) -> &OrderList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut OrderList {
        &mut self.list
    }

    /// Fetch the client and product name lookups if they are missing
    pub async fn load_lookups(&mut self) {
        if self.clients.is_loaded() && self.products.is_loaded() {
            return;
        }
        let clients_api = self.api.clone();
        let products_api = self.api.clone();
        let (clients, products) = futures::join!(
            async move { clients_api.clients().list_all().await },
            async move { products_api.products().all().await },
        );
        self.clients.load_from("clients", clients);
        self.products.load_from("products", products);
    }

    /// Load the current page. Expanded rows are discarded.
    pub async fn load(&mut self) -> Result<Applied> {
        self.expansion.reset();
        if self.clients.is_loaded() && self.products.is_loaded() {
            return self.list.load().await;
        }

        let clients_api = self.api.clone();
        let products_api = self.api.clone();
        let (page, clients, products) = futures::join!(
            self.list.load(),
            async move { clients_api.clients().list_all().await },
            async move { products_api.products().all().await },
        );
        self.clients.load_from("clients", clients);
        self.products.load_from("products", products);
        page
    }

    /// Replace the filter after checking the date range
    pub async fn apply_filter(&mut self, filter: OrderFilter) -> Result<Applied> {
        filter.validate()?;
        self.list.set_filter(filter);
        self.load().await
    }

    pub async fn show_page(&mut self, page: usize) -> Result<Applied> {
        self.list.set_page(page);
        self.load().await
    }

    pub fn client_name(&self, order: &Order) -> String {
        self.clients.resolve(&order.client_id)
    }

    pub fn product_name(&self, item: &OrderItem) -> String {
        self.products.resolve(&item.product_id)
    }

    pub async fn expand(&mut self, id: OrderId) -> Result<&[OrderItem]> {
        self.expansion.expand(&self.api, id).await
    }

    pub fn collapse(&mut self, id: OrderId) {
        self.expansion.collapse(id);
    }

    pub fn expansion_state(&self, id: OrderId) -> ExpansionState {
        self.expansion.state(id)
    }

    pub fn is_expanded(&self, id: OrderId) -> bool {
        self.expansion.is_open(id)
    }

    /// Items of a row that is currently expanded
    pub fn expanded_items(&self, id: OrderId) -> Option<&[OrderItem]> {
        if self.expansion.is_open(id) {
            self.expansion.items(id)
        } else {
            None
        }
    }

    pub async fn create(&mut self, order: &NewOrder) -> Result<Option<Order>> {
        let created = self.api.orders().create(order).await?;
        info!(client = %order.client_id, lines = order.items.len(), "order created");
        self.list.invalidate();
        self.settle().await;
        Ok(created)
    }

    /// Generate the invoice; the order becomes INVOICED
    pub async fn invoice(&mut self, id: OrderId) -> Result<Option<Order>> {
        let order = self.api.orders().invoice(id).await?;
        self.absorb(order.clone()).await;
        Ok(order)
    }

    pub async fn cancel(&mut self, id: OrderId) -> Result<Option<Order>> {
        let order = self.api.orders().cancel(id).await?;
        self.absorb(order.clone()).await;
        Ok(order)
    }

    /// Invoice document bytes (PDF)
    pub async fn download_invoice(&self, id: OrderId) -> Result<Vec<u8>> {
        Ok(self.api.orders().download_invoice(id).await?)
    }

    /// Patch the returned order in place. The page is reloaded when the
    /// server sent nothing back or the order left the filter.
    async fn absorb(&mut self, order: Option<Order>) {
        match order {
            Some(order) => {
                self.list.patch(&order);
                if self.list.admits(&order) {
                    return;
                }
            }
            None => self.list.invalidate(),
        }
        self.settle().await;
    }

    async fn settle(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "order list reload after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posadmin_client::Method;
    use posadmin_testing::{Connection, FakeBackend, fixtures};
    use posadmin_types::{NewOrderItem, OrderStatus};
    use std::sync::Arc;

    fn backend() -> Arc<FakeBackend> {
        let clients = fixtures::clients(2);
        let products = fixtures::products_for(&clients, 2);
        let orders = (1..=12)
            .map(|id| {
                let status = if id % 3 == 0 {
                    OrderStatus::Invoiced
                } else {
                    OrderStatus::Created
                };
                fixtures::order(id, 1 + id % 2, status, fixtures::timestamp(2024, 4, id as u32))
            })
            .collect();
        Arc::new(
            FakeBackend::new()
                .with_orders(orders)
                .with_items(1, vec![fixtures::order_item(100, 1, 2, 3, 9.5)])
                .with_products(products)
                .with_clients(clients),
        )
    }

    fn screen(backend: &Arc<FakeBackend>) -> OrdersScreen {
        OrdersScreen::new(Connection::admin(backend).api, &Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_expand_fetches_once_and_resolves_names() {
        let backend = backend();
        let mut screen = screen(&backend);
        screen.load().await.unwrap();
        let id = OrderId::new(1);

        let items = screen.expand(id).await.unwrap().to_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(screen.product_name(&items[0]), "Client 001 item 2");

        screen.collapse(id);
        screen.expand(id).await.unwrap();
        screen.collapse(id);
        screen.expand(id).await.unwrap();

        assert_eq!(backend.count(Method::Get, "/orders/1/items"), 1);
        assert!(screen.is_expanded(id));
    }

    #[tokio::test]
    async fn test_page_change_discards_expansion() {
        let backend = backend();
        let mut screen = screen(&backend);
        screen.load().await.unwrap();
        let id = OrderId::new(1);

        screen.expand(id).await.unwrap();
        screen.show_page(1).await.unwrap();
        assert_eq!(screen.expansion_state(id), ExpansionState::Collapsed);

        screen.show_page(0).await.unwrap();
        screen.expand(id).await.unwrap();
        assert_eq!(backend.count(Method::Get, "/orders/1/items"), 2);
        // Lookups are loaded with the first page only
        assert_eq!(backend.count(Method::Get, "/clients"), 1);
        assert_eq!(backend.count(Method::Get, "/products"), 1);
    }

    #[tokio::test]
    async fn test_status_filter_and_client_names() {
        let backend = backend();
        let mut screen = screen(&backend);

        screen
            .apply_filter(OrderFilter {
                status: Some(OrderStatus::Invoiced),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(screen.list().total(), 4);
        let first = screen.list().rows()[0].clone();
        assert_eq!(first.id, OrderId::new(3));
        assert_eq!(screen.client_name(&first), "Client 002");
    }

    #[tokio::test]
    async fn test_inverted_date_range_rejected_before_request() {
        let backend = backend();
        let mut screen = screen(&backend);

        let err = screen
            .apply_filter(OrderFilter {
                start_date: chrono_date(2024, 5, 1),
                end_date: chrono_date(2024, 4, 1),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, crate::Error::Input(_)));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invoice_patches_row_then_cancel_fails() {
        let backend = backend();
        let mut screen = screen(&backend);
        screen.load().await.unwrap();
        let id = OrderId::new(2);

        screen.invoice(id).await.unwrap();
        assert_eq!(screen.list().rows()[1].status, OrderStatus::Invoiced);
        assert_eq!(backend.count(Method::Get, "/orders"), 1);

        assert!(screen.cancel(id).await.is_err());
        assert_eq!(screen.list().rows()[1].status, OrderStatus::Invoiced);

        let pdf = screen.download_invoice(id).await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_create_reloads_list() {
        let backend = backend();
        let mut screen = screen(&backend);
        screen.load().await.unwrap();

        let created = screen
            .create(&NewOrder {
                client_id: ClientId::new(1),
                items: vec![NewOrderItem {
                    product_id: ProductId::new(1),
                    quantity: 2,
                    selling_price: 12.0,
                }],
            })
            .await
            .unwrap();

        assert!(created.is_some());
        assert_eq!(screen.list().total(), 13);
        assert_eq!(backend.count(Method::Get, "/orders"), 2);
    }

    #[tokio::test]
    async fn test_lookups_without_list_load() {
        let backend = backend();
        let mut screen = screen(&backend);
        let id = OrderId::new(1);

        screen.load_lookups().await;
        screen.load_lookups().await;
        assert_eq!(backend.count(Method::Get, "/clients"), 1);
        assert_eq!(backend.count(Method::Get, "/orders"), 0);

        assert!(screen.expanded_items(id).is_none());
        screen.expand(id).await.unwrap();
        let items = screen.expanded_items(id).unwrap();
        assert_eq!(screen.product_name(&items[0]), "Client 001 item 2");

        screen.collapse(id);
        assert!(screen.expanded_items(id).is_none());
    }

    #[tokio::test]
    async fn test_invoice_under_created_filter_drops_row() {
        let backend = backend();
        let mut screen = screen(&backend);
        screen
            .apply_filter(OrderFilter {
                status: Some(OrderStatus::Created),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(screen.list().total(), 8);

        screen.invoice(OrderId::new(2)).await.unwrap();

        let statuses: Vec<OrderStatus> = screen.list().rows().iter().map(|o| o.status).collect();
        assert_eq!(statuses, vec![OrderStatus::Created; 7]);
        assert_eq!(screen.list().total(), 7);
        assert_eq!(backend.count(Method::Get, "/orders"), 2);
    }

    #[tokio::test]
    async fn test_created_order_returned_when_reload_fails() {
        let backend = backend();
        let mut screen = screen(&backend);
        screen.load().await.unwrap();

        backend.fail_next(Method::Get, "/orders", 500);
        let created = screen
            .create(&NewOrder {
                client_id: ClientId::new(2),
                items: vec![NewOrderItem {
                    product_id: ProductId::new(3),
                    quantity: 1,
                    selling_price: 4.0,
                }],
            })
            .await
            .unwrap();

        assert!(created.is_some());
        assert_eq!(backend.orders().len(), 13);
        assert!(matches!(screen.list().state(), crate::LoadState::Failed(_)));
    }

    fn chrono_date(y: i32, m: u32, d: u32) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(y, m, d)
    }
}
