//! Session manager: cached credentials plus the login-check lifecycle.
//!
//! One instance is created at startup and shared (via `Arc`) with the
//! [`ApiClient`](crate::ApiClient). The check lifecycle is
//! `Idle -> Checking -> Settled`; only one check may run at a time.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use posadmin_types::SessionInfo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::store::CredentialStore;
use crate::{Error, Result};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value for HTTP Basic auth
    pub fn basic_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.email, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Authenticated(SessionInfo),
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Checking,
    Settled(SessionStatus),
}

struct SessionState {
    phase: SessionPhase,
    credentials: Option<Credentials>,
}

pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    state: Mutex<SessionState>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            state: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                credentials: None,
            }),
        }
    }

    /// Load cached credentials from the store without contacting the server.
    ///
    /// Returns whether anything was cached.
    pub fn restore_cached(&self) -> Result<bool> {
        let cached = self.store.load()?;
        let found = cached.is_some();
        self.lock().credentials = cached;
        Ok(found)
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase.clone()
    }

    pub fn cached_credentials(&self) -> Option<Credentials> {
        self.lock().credentials.clone()
    }

    pub fn email(&self) -> Option<String> {
        self.lock().credentials.as_ref().map(|c| c.email.clone())
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.lock()
            .credentials
            .as_ref()
            .map(Credentials::basic_header)
    }

    /// Enter `Checking`. Fails if a check is already running.
    pub fn begin_check(&self) -> Result<()> {
        let mut state = self.lock();
        if state.phase == SessionPhase::Checking {
            return Err(Error::AuthInProgress);
        }
        state.phase = SessionPhase::Checking;
        Ok(())
    }

    /// Finish a check with verified credentials; they become the cached session.
    pub fn accept(&self, credentials: Credentials, info: SessionInfo) -> Result<()> {
        let saved = self.store.save(&credentials);
        let mut state = self.lock();
        state.credentials = Some(credentials);
        state.phase = SessionPhase::Settled(SessionStatus::Authenticated(info));
        saved
    }

    /// Finish a check without a verified identity. Cached credentials are untouched.
    pub fn reject(&self) {
        self.lock().phase = SessionPhase::Settled(SessionStatus::Anonymous);
    }

    /// Drop cached credentials after the server answered 401.
    ///
    /// Returns `true` only for the call that actually cleared something, so
    /// a burst of 401s clears the store exactly once.
    pub fn invalidate(&self) -> bool {
        let mut state = self.lock();
        if state.credentials.is_none() {
            return false;
        }
        state.credentials = None;
        state.phase = SessionPhase::Settled(SessionStatus::Anonymous);
        drop(state);

        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear cached credentials");
        }
        info!("cached credentials invalidated");
        true
    }

    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.lock();
            state.credentials = None;
            state.phase = SessionPhase::Settled(SessionStatus::Anonymous);
        }
        self.store.clear()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
