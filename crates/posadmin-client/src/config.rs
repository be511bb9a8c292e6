use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/pos/api";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_FETCH_ALL_CHUNK: usize = 100;

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. POSADMIN_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.posadmin (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("POSADMIN_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("posadmin"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".posadmin"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Rows per page on every list screen
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Page size used when loading a whole collection page by page
    #[serde(default = "default_fetch_all_chunk")]
    pub fetch_all_chunk: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_fetch_all_chunk() -> usize {
    DEFAULT_FETCH_ALL_CHUNK
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            fetch_all_chunk: default_fetch_all_chunk(),
        }
    }
}

impl Config {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `POSADMIN_BASE_URL` and an explicit override, in that order.
    pub fn with_base_url_override(mut self, explicit: Option<&str>) -> Self {
        if let Ok(env_url) = std::env::var("POSADMIN_BASE_URL")
            && !env_url.trim().is_empty()
        {
            self.base_url = env_url;
        }
        if let Some(url) = explicit {
            self.base_url = url.to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.fetch_all_chunk == 0 {
            return Err(Error::Config(
                "fetch_all_chunk must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
