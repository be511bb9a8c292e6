use crate::args::OutputFormat;
use crate::presentation::ConsoleRenderer;
use anyhow::{Context as _, Result};
use once_cell::sync::OnceCell;
use posadmin_client::{ApiClient, Config, FileCredentialStore, HttpTransport, SessionManager};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a handler needs: resolved config plus a lazily built client.
///
/// The client is only created on first use so commands that never reach
/// the backend (e.g. `logout`) work with a broken base URL.
pub struct ExecutionContext {
    data_dir: PathBuf,
    config: Config,
    format: OutputFormat,
    api: OnceCell<ApiClient>,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, base_url: Option<&str>, format: OutputFormat) -> Result<Self> {
        let config_path = Config::path_in(&data_dir);
        let config = Config::load_from(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?
            .with_base_url_override(base_url);
        config.validate()?;

        Ok(Self {
            data_dir,
            config,
            format,
            api: OnceCell::new(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn renderer(&self) -> ConsoleRenderer {
        ConsoleRenderer::new(self.format)
    }

    pub fn credentials_store(&self) -> FileCredentialStore {
        FileCredentialStore::in_data_dir(&self.data_dir)
    }

    /// Client with cached credentials loaded (not yet verified)
    pub fn api(&self) -> Result<&ApiClient> {
        self.api.get_or_try_init(|| {
            let transport = HttpTransport::new(self.config.base_url.clone())?;
            let session = SessionManager::new(Arc::new(self.credentials_store()));
            session.restore_cached()?;
            Ok(ApiClient::new(Arc::new(transport), Arc::new(session)))
        })
    }
}
