use posadmin_client::{ApiClient, Config, UploadSummary};
use posadmin_types::{Inventory, InventoryFilter, Product, ProductId};
use tracing::info;

use crate::Result;
use crate::controller::{Applied, ListController};
use crate::lookup::LookupJoin;
use crate::source::{InventoryPages, RemotePagedSource};

pub type InventoryList = ListController<RemotePagedSource<InventoryPages>>;

/// Stock levels keyed by product; the barcode column is joined from products.
pub struct InventoryScreen {
    api: ApiClient,
    list: InventoryList,
    barcodes: LookupJoin<ProductId, Product>,
}

impl InventoryScreen {
    pub fn new(api: ApiClient, config: &Config) -> Result<Self> {
        let source = RemotePagedSource::new(api.clone(), InventoryPages);
        Ok(Self {
            list: ListController::new(source, config.page_size)?,
            barcodes: LookupJoin::product_barcodes(),
            api,
        })
    }

    pub fn list(&self) -> &InventoryList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut InventoryList {
        &mut self.list
    }

    pub async fn load(&mut self) -> Result<Applied> {
        if self.barcodes.is_loaded() {
            return self.list.load().await;
        }
        let api = self.api.clone();
        let (page, products) = futures::join!(self.list.load(), async move {
            api.products().all().await
        });
        self.barcodes.load_from("products", products);
        page
    }

    pub async fn apply_filter(&mut self, filter: InventoryFilter) -> Result<Applied> {
        self.list.set_filter(filter);
        self.load().await
    }

    pub fn barcode(&self, row: &Inventory) -> String {
        self.barcodes.resolve(&row.product_id)
    }

    /// Set the quantity on hand for one product
    pub async fn update(&mut self, product_id: ProductId, quantity: i64) -> Result<Option<Inventory>> {
        let updated = self.api.inventory().update(product_id, quantity).await?;
        self.list.absorb(updated.clone()).await;
        Ok(updated)
    }

    /// Import a TSV file of stock levels
    pub async fn upload(&mut self, tsv: String) -> Result<UploadSummary> {
        let summary = self.api.inventory().upload_tsv(tsv).await?;
        info!(records = summary.length, "inventory imported");
        self.list.refresh().await;
        Ok(summary)
    }
}
