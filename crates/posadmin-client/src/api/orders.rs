use posadmin_types::{NewOrder, Order, OrderFilter, OrderId, OrderItem, Page, PageRequest, PagedResponse};

use super::ApiClient;
use crate::Result;
use crate::transport::ApiRequest;

pub struct OrderOps<'a> {
    api: &'a ApiClient,
}

impl<'a> OrderOps<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /orders` with the filter in the query string
    pub async fn list(&self, filter: &OrderFilter, page: PageRequest) -> Result<Page<Order>> {
        filter.validate()?;
        let mut request = ApiRequest::get("/orders")
            .query("page", page.page)
            .query("pageSize", page.page_size);
        for (key, value) in filter.query_pairs() {
            request = request.query(key, value);
        }
        let response: PagedResponse<Order> = self.api.execute(request).await?.json()?;
        Ok(response.into())
    }

    pub async fn create(&self, order: &NewOrder) -> Result<Option<Order>> {
        let request = ApiRequest::post("/orders").json(order)?;
        self.api.execute(request).await?.json_opt()
    }

    pub async fn items(&self, id: OrderId) -> Result<Vec<OrderItem>> {
        let request = ApiRequest::get(format!("/orders/{}/items", id));
        self.api.execute(request).await?.json()
    }

    /// Generate the invoice; the order moves to INVOICED
    pub async fn invoice(&self, id: OrderId) -> Result<Option<Order>> {
        let request = ApiRequest::post(format!("/orders/{}/invoice", id));
        self.api.execute(request).await?.json_opt()
    }

    /// Raw invoice document (PDF)
    pub async fn download_invoice(&self, id: OrderId) -> Result<Vec<u8>> {
        let request = ApiRequest::get(format!("/orders/{}/invoice/download", id));
        Ok(self.api.execute(request).await?.body)
    }

    pub async fn cancel(&self, id: OrderId) -> Result<Option<Order>> {
        let request = ApiRequest::post(format!("/orders/{}/cancel", id));
        self.api.execute(request).await?.json_opt()
    }
}
