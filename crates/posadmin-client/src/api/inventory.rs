use posadmin_types::{
    Inventory, InventoryFilter, InventoryUpdate, Page, PageRequest, PagedResponse, ProductId,
};

use super::{ApiClient, ListBody, UploadSummary};
use crate::Result;
use crate::transport::ApiRequest;

pub struct InventoryOps<'a> {
    api: &'a ApiClient,
}

impl<'a> InventoryOps<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /inventory/list`
    pub async fn list(
        &self,
        filter: &InventoryFilter,
        page: PageRequest,
    ) -> Result<Page<Inventory>> {
        let request = ApiRequest::post("/inventory/list").json(&ListBody::new(filter, page))?;
        let response: PagedResponse<Inventory> = self.api.execute(request).await?.json()?;
        Ok(response.into())
    }

    /// Set the stock level of one product
    pub async fn update(&self, product_id: ProductId, quantity: i64) -> Result<Option<Inventory>> {
        let request = ApiRequest::put(format!("/inventory/{}", product_id))
            .json(&InventoryUpdate { quantity })?;
        self.api.execute(request).await?.json_opt()
    }

    pub async fn upload_tsv(&self, tsv: String) -> Result<UploadSummary> {
        self.api.upload_tsv("/inventory/upload/tsv", tsv).await
    }
}
