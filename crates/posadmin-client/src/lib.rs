//! REST client for the PoS backend.
//!
//! Every request goes through [`ApiClient`], which attaches the Basic-Auth
//! header from the [`SessionManager`] and maps HTTP failures onto [`Error`].
//! The network itself sits behind the [`Transport`] trait so the list
//! controllers can run against an in-memory backend in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
pub mod transport;
pub mod tsv;

pub use api::{
    ApiClient, ClientOps, InventoryOps, OrderOps, ProductOps, ReportOps, UploadSummary,
};
pub use config::{Config, resolve_data_dir};
pub use error::{Error, FieldError, Result, ValidationErrors};
pub use http::HttpTransport;
pub use session::{Credentials, SessionManager, SessionPhase, SessionStatus};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use transport::{ApiRequest, ApiResponse, Body, Method, Transport};
pub use tsv::TsvErrorReport;
