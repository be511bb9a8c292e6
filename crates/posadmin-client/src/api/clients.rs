use posadmin_types::{Client, ClientForm, ClientId, Page, PageRequest, PagedResponse};

use super::ApiClient;
use crate::Result;
use crate::transport::ApiRequest;

pub struct ClientOps<'a> {
    api: &'a ApiClient,
}

impl<'a> ClientOps<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /clients`: the whole unfiltered collection, used for lookups
    pub async fn list_all(&self) -> Result<Vec<Client>> {
        self.api.execute(ApiRequest::get("/clients")).await?.json()
    }

    /// `GET /clients?page=&pageSize=`
    pub async fn page(&self, page: PageRequest) -> Result<Page<Client>> {
        let request = ApiRequest::get("/clients")
            .query("page", page.page)
            .query("pageSize", page.page_size);
        let response: PagedResponse<Client> = self.api.execute(request).await?.json()?;
        Ok(response.into())
    }

    pub async fn create(&self, form: &ClientForm) -> Result<Option<Client>> {
        let request = ApiRequest::post("/clients").json(form)?;
        self.api.execute(request).await?.json_opt()
    }

    pub async fn update(&self, id: ClientId, form: &ClientForm) -> Result<Option<Client>> {
        let request = ApiRequest::put(format!("/clients/{}", id)).json(form)?;
        self.api.execute(request).await?.json_opt()
    }

    /// Flip the enabled flag
    pub async fn toggle(&self, id: ClientId) -> Result<Option<Client>> {
        let request = ApiRequest::patch(format!("/clients/{}/toggle", id));
        self.api.execute(request).await?.json_opt()
    }
}
