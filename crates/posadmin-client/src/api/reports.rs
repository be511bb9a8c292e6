use posadmin_types::{DaySalesFilter, DaySalesRow, SalesReportFilter, SalesReportRow};

use super::ApiClient;
use crate::Result;
use crate::transport::ApiRequest;

pub struct ReportOps<'a> {
    api: &'a ApiClient,
}

impl<'a> ReportOps<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn sales(&self, filter: &SalesReportFilter) -> Result<Vec<SalesReportRow>> {
        filter.validate()?;
        let request = ApiRequest::post("/reports/sales").json(filter)?;
        self.api.execute(request).await?.json()
    }

    pub async fn day_sales(&self, filter: &DaySalesFilter) -> Result<Vec<DaySalesRow>> {
        filter.validate()?;
        let request = ApiRequest::post("/reports/day-sales").json(filter)?;
        self.api.execute(request).await?.json()
    }

    /// CSV export of the sales report
    pub async fn export_sales(&self, filter: &SalesReportFilter) -> Result<Vec<u8>> {
        filter.validate()?;
        let request = ApiRequest::post("/reports/sales/export").json(filter)?;
        Ok(self.api.execute(request).await?.body)
    }

    /// CSV export of the day-sales report
    pub async fn export_day_sales(&self, filter: &DaySalesFilter) -> Result<Vec<u8>> {
        filter.validate()?;
        let request = ApiRequest::post("/reports/day-sales/export").json(filter)?;
        Ok(self.api.execute(request).await?.body)
    }
}
