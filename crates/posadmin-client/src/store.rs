//! Persistence for the cached login credentials.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::Result;
use crate::session::Credentials;

pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>>;
    fn save(&self, credentials: &Credentials) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Stores credentials as JSON in `<data dir>/credentials.json`.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(credentials)?)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// In-memory store. Counts clears so tests can check invalidation.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    credentials: Option<Credentials>,
    clears: usize,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                credentials: Some(credentials),
                clears: 0,
            }),
        }
    }

    pub fn clear_count(&self) -> usize {
        self.lock().clears
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.lock().credentials.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        self.lock().credentials = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut state = self.lock();
        state.credentials = None;
        state.clears += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = FileCredentialStore::in_data_dir(temp_dir.path());

        assert!(store.load()?.is_none());

        store.save(&Credentials::new("admin@pos.test", "secret"))?;
        let loaded = store.load()?.expect("credentials saved");
        assert_eq!(loaded.email, "admin@pos.test");

        store.clear()?;
        assert!(store.load()?.is_none());
        // Clearing twice is harmless
        store.clear()?;
        Ok(())
    }
}
