//! Typed endpoint groups over a shared [`ApiClient`].
//!
//! Each group borrows the client (`api.products().list(..)`), mirroring the
//! screens of the console.

mod clients;
mod inventory;
mod orders;
mod products;
mod reports;

pub use clients::ClientOps;
pub use inventory::InventoryOps;
pub use orders::OrderOps;
pub use products::ProductOps;
pub use reports::ReportOps;

use posadmin_types::{PageRequest, SessionInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::session::{Credentials, SessionManager, SessionPhase};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::tsv::TsvErrorReport;
use crate::{Error, Result};

pub(crate) const TSV_CONTENT_TYPE: &str = "text/tab-separated-values";

/// Body of every `POST /{entity}/list` request
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListBody<'a, F: Serialize> {
    page: usize,
    page_size: usize,
    #[serde(flatten)]
    filter: &'a F,
}

impl<'a, F: Serialize> ListBody<'a, F> {
    pub(crate) fn new(filter: &'a F, page: PageRequest) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            filter,
        }
    }
}

/// Holds the session in `Checking`. If it is dropped before the check
/// settles, e.g. because the caller dropped the future, the session falls
/// back to anonymous.
struct CheckGuard<'a> {
    session: &'a SessionManager,
}

impl<'a> CheckGuard<'a> {
    fn begin(session: &'a SessionManager) -> Result<Self> {
        session.begin_check()?;
        Ok(Self { session })
    }
}

impl Drop for CheckGuard<'_> {
    fn drop(&mut self) {
        if self.session.phase() == SessionPhase::Checking {
            debug!("session check abandoned");
            self.session.reject();
        }
    }
}

/// Successful TSV import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    /// Number of records imported
    pub length: usize,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionManager>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn clients(&self) -> ClientOps<'_> {
        ClientOps::new(self)
    }

    pub fn products(&self) -> ProductOps<'_> {
        ProductOps::new(self)
    }

    pub fn inventory(&self) -> InventoryOps<'_> {
        InventoryOps::new(self)
    }

    pub fn orders(&self) -> OrderOps<'_> {
        OrderOps::new(self)
    }

    pub fn reports(&self) -> ReportOps<'_> {
        ReportOps::new(self)
    }

    /// Verify `email`/`password` against `GET /session` and cache them on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionInfo> {
        let _check = CheckGuard::begin(&self.session)?;
        let credentials = Credentials::new(email, password);

        match self.verify(&credentials).await {
            Ok(info) => {
                self.session.accept(credentials, info.clone())?;
                Ok(info)
            }
            Err(e) => {
                self.session.reject();
                Err(e)
            }
        }
    }

    /// Re-check cached credentials. Returns `None` when nothing is cached.
    ///
    /// A 401 invalidates the cache; other failures leave it intact.
    pub async fn restore(&self) -> Result<Option<SessionInfo>> {
        let _check = CheckGuard::begin(&self.session)?;
        self.session.restore_cached()?;

        let Some(credentials) = self.session.cached_credentials() else {
            self.session.reject();
            return Ok(None);
        };

        match self.verify(&credentials).await {
            Ok(info) => {
                self.session.accept(credentials, info.clone())?;
                Ok(Some(info))
            }
            Err(Error::Unauthorized) => {
                self.session.invalidate();
                Err(Error::Unauthorized)
            }
            Err(e) => {
                self.session.reject();
                Err(e)
            }
        }
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }

    async fn verify(&self, credentials: &Credentials) -> Result<SessionInfo> {
        let request = ApiRequest::get("/session").authorization(credentials.basic_header());
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(Error::from_status(response.status, &response.body));
        }
        response.json()
    }

    /// Send with the session header. Only 401 is handled here; every other
    /// status is returned to the caller untouched.
    pub(crate) async fn execute_raw(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        request.authorization = self.session.authorization_header();
        debug!(method = %request.method, path = %request.path, "sending request");

        let response = self.transport.send(request).await?;
        if response.status == 401 {
            if self.session.invalidate() {
                warn!("backend rejected cached credentials; session cleared");
            }
            return Err(Error::Unauthorized);
        }
        Ok(response)
    }

    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.execute_raw(request).await?;
        if !response.is_success() {
            return Err(Error::from_status(response.status, &response.body));
        }
        Ok(response)
    }

    /// `POST {path}` with a TSV body. A 400 carries the error report.
    pub(crate) async fn upload_tsv(&self, path: &str, tsv: String) -> Result<UploadSummary> {
        let request = ApiRequest::post(path).text(TSV_CONTENT_TYPE, tsv);
        let response = self.execute_raw(request).await?;

        match response.status {
            200..=299 => response.json(),
            400 => Err(Error::TsvRejected(TsvErrorReport::parse(&response.body)?)),
            status => Err(Error::from_status(status, &response.body)),
        }
    }
}
