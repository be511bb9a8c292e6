use posadmin_types::{Page, PageRequest, PagedResponse, Product, ProductFilter, ProductForm, ProductId};

use super::{ApiClient, ListBody, UploadSummary};
use crate::Result;
use crate::transport::ApiRequest;

pub struct ProductOps<'a> {
    api: &'a ApiClient,
}

impl<'a> ProductOps<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /products/list`: server-side filter and pagination
    pub async fn list(&self, filter: &ProductFilter, page: PageRequest) -> Result<Page<Product>> {
        let request = ApiRequest::post("/products/list").json(&ListBody::new(filter, page))?;
        let response: PagedResponse<Product> = self.api.execute(request).await?.json()?;
        Ok(response.into())
    }

    /// `GET /products`: the whole collection, used for lookups
    pub async fn all(&self) -> Result<Vec<Product>> {
        self.api.execute(ApiRequest::get("/products")).await?.json()
    }

    pub async fn create(&self, form: &ProductForm) -> Result<Option<Product>> {
        let request = ApiRequest::post("/products").json(form)?;
        self.api.execute(request).await?.json_opt()
    }

    pub async fn update(&self, id: ProductId, form: &ProductForm) -> Result<Option<Product>> {
        let request = ApiRequest::put(format!("/products/{}", id)).json(form)?;
        self.api.execute(request).await?.json_opt()
    }

    pub async fn upload_tsv(&self, tsv: String) -> Result<UploadSummary> {
        self.api.upload_tsv("/products/upload/tsv", tsv).await
    }
}
