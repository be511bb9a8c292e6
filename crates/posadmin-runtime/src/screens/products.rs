use posadmin_client::{ApiClient, Config, UploadSummary};
use posadmin_types::{Client, ClientId, Product, ProductFilter, ProductForm, ProductId};
use tracing::info;

use crate::Result;
use crate::controller::{Applied, ListController};
use crate::lookup::LookupJoin;
use crate::source::{ProductPages, RemotePagedSource};

pub type ProductList = ListController<RemotePagedSource<ProductPages>>;

/// Products page on the server; the client column is joined locally.
pub struct ProductsScreen {
    api: ApiClient,
    list: ProductList,
    clients: LookupJoin<ClientId, Client>,
}

impl ProductsScreen {
    pub fn new(api: ApiClient, config: &Config) -> Result<Self> {
        let source = RemotePagedSource::new(api.clone(), ProductPages);
        Ok(Self {
            list: ListController::new(source, config.page_size)?,
            clients: LookupJoin::client_names(),
            api,
        })
    }

    pub fn list(&self) -> &ProductList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ProductList {
        &mut self.list
    }

    /// Load the current page, and the client names the first time round
    pub async fn load(&mut self) -> Result<Applied> {
        if self.clients.is_loaded() {
            return self.list.load().await;
        }
        let api = self.api.clone();
        let (page, clients) = futures::join!(self.list.load(), async move {
            api.clients().list_all().await
        });
        self.clients.load_from("clients", clients);
        page
    }

    pub async fn apply_filter(&mut self, filter: ProductFilter) -> Result<Applied> {
        self.list.set_filter(filter);
        self.load().await
    }

    pub fn client_name(&self, id: ClientId) -> String {
        self.clients.resolve(&id)
    }

    pub async fn add(&mut self, form: &ProductForm) -> Result<Option<Product>> {
        let created = self.api.products().create(form).await?;
        info!(barcode = %form.barcode, "product created");
        self.list.refresh().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: ProductId, form: &ProductForm) -> Result<Option<Product>> {
        let updated = self.api.products().update(id, form).await?;
        self.list.absorb(updated.clone()).await;
        Ok(updated)
    }

    /// Import a TSV file. A rejected file leaves the loaded page as it was.
    pub async fn upload(&mut self, tsv: String) -> Result<UploadSummary> {
        let summary = self.api.products().upload_tsv(tsv).await?;
        info!(records = summary.length, "products imported");
        self.list.refresh().await;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posadmin_client::{Error as ApiError, Method};
    use posadmin_testing::{Connection, FakeBackend, fixtures};
    use std::sync::Arc;

    fn backend() -> Arc<FakeBackend> {
        let clients = fixtures::clients(3);
        Arc::new(
            FakeBackend::new()
                .with_products(fixtures::products_for(&clients, 4))
                .with_clients(clients),
        )
    }

    #[tokio::test]
    async fn test_client_names_loaded_once() {
        let backend = backend();
        let mut screen =
            ProductsScreen::new(Connection::admin(&backend).api, &Config::default()).unwrap();

        screen.load().await.unwrap();
        screen.list_mut().next_page();
        screen.load().await.unwrap();

        let first = screen.list().rows()[0].clone();
        assert_eq!(screen.client_name(first.client_id), "Client 003");
        assert_eq!(screen.client_name(ClientId::new(99)), "#99");
        assert_eq!(backend.count(Method::Get, "/clients"), 1);
        assert_eq!(backend.count(Method::Post, "/products/list"), 2);
    }

    #[tokio::test]
    async fn test_lookup_failure_still_renders_rows() {
        let backend = backend();
        let conn = Connection::admin(&backend);
        let mut screen = ProductsScreen::new(conn.api, &Config::default()).unwrap();

        // Whichever request goes first fails. The lookup failure is
        // swallowed, a page failure is not, so load the page again.
        backend.respond_next(500, r#"{"message":"boom"}"#);
        if screen.load().await.is_err() {
            screen.load().await.unwrap();
        }

        assert_eq!(screen.list().rows().len(), 10);
        assert_eq!(screen.list().total(), 12);
    }

    #[tokio::test]
    async fn test_rejected_upload_leaves_page() {
        let backend = backend();
        let mut screen =
            ProductsScreen::new(Connection::admin(&backend).api, &Config::default()).unwrap();
        screen.load().await.unwrap();
        let before = screen.list().rows().to_vec();

        backend.reject_next_upload(fixtures::tsv_error_report(3));
        let err = screen.upload(fixtures::product_tsv(3)).await.unwrap_err();

        let Some(ApiError::TsvRejected(report)) = err.api() else {
            panic!("expected TSV rejection, got {:?}", err);
        };
        assert_eq!(report.rows().len(), 3);
        assert_eq!(screen.list().rows(), before.as_slice());
        assert_eq!(screen.list().total(), 12);
        assert_eq!(backend.products().len(), 12);
    }

    #[tokio::test]
    async fn test_update_patches_row() {
        let backend = backend();
        let mut screen =
            ProductsScreen::new(Connection::admin(&backend).api, &Config::default()).unwrap();
        screen.load().await.unwrap();
        let target = screen.list().rows()[2].clone();

        let form = ProductForm {
            name: "Renamed".to_string(),
            barcode: target.barcode.clone(),
            mrp: target.mrp,
            client_id: target.client_id,
            image_url: None,
        };
        screen.update(target.id, &form).await.unwrap();

        assert_eq!(screen.list().rows()[2].name, "Renamed");
        assert_eq!(backend.count(Method::Post, "/products/list"), 1);
    }

    #[tokio::test]
    async fn test_rename_out_of_name_filter_reloads_page() {
        let backend = backend();
        let mut screen =
            ProductsScreen::new(Connection::admin(&backend).api, &Config::default()).unwrap();
        screen
            .apply_filter(ProductFilter {
                name: Some("item 2".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(screen.list().total(), 3);
        let target = screen.list().rows()[0].clone();

        let form = ProductForm {
            name: "Discontinued".to_string(),
            barcode: target.barcode.clone(),
            mrp: target.mrp,
            client_id: target.client_id,
            image_url: None,
        };
        screen.update(target.id, &form).await.unwrap();

        assert_eq!(screen.list().total(), 2);
        assert!(screen.list().rows().iter().all(|p| p.id != target.id));
        assert_eq!(backend.count(Method::Post, "/products/list"), 2);
    }

    #[tokio::test]
    async fn test_upload_is_reported_when_reload_fails() {
        let backend = backend();
        let mut screen =
            ProductsScreen::new(Connection::admin(&backend).api, &Config::default()).unwrap();
        screen.load().await.unwrap();

        backend.fail_next(Method::Post, "/products/list", 500);
        let summary = screen.upload(fixtures::product_tsv(3)).await.unwrap();

        assert_eq!(summary.length, 3);
        assert!(matches!(screen.list().state(), crate::LoadState::Failed(_)));
    }
}
