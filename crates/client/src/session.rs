//! Session store: the persisted bearer token and cached user snapshot

use std::sync::Arc;

use roster_core::User;
use roster_http::{AuthGrant, AuthenticatedRosterClient, PublicRosterClient};
use tracing::{debug, info, warn};

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use crate::storage::{FileStorage, SessionStorage, TOKEN_KEY, USER_KEY};

const LOGIN_FAILED: &str = "failed to sign in";

/// The client's single session.
///
/// Token and user snapshot are written together on login and removed
/// together on logout. Queries read storage on every call, so several
/// `Session` values over the same storage agree with each other.
#[derive(Clone)]
pub struct Session {
    client: PublicRosterClient,
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    pub fn new(client: PublicRosterClient, storage: Arc<dyn SessionStorage>) -> Self {
        Self { client, storage }
    }

    /// Build a session over file storage in the configured state directory
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        let client = config
            .client_builder()
            .build_public()
            .map_err(|e| ConsoleError::Configuration(e.to_string()))?;
        let storage = FileStorage::new(config.state_dir());
        debug!("Session storage at {}", storage.path().display());

        Ok(Self::new(client, Arc::new(storage)))
    }

    pub const fn client(&self) -> &PublicRosterClient {
        &self.client
    }

    /// Sign in and persist the returned token and user.
    ///
    /// On any failure the previously stored session is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthGrant> {
        let grant = self
            .client
            .login(email, password)
            .await
            .map_err(|e| ConsoleError::from_login(e, LOGIN_FAILED))?;

        let snapshot = serde_json::to_string(&grant.user).map_err(|e| ConsoleError::MalformedResponse {
            message: e.to_string(),
        })?;

        let previous = [TOKEN_KEY, USER_KEY].map(|key| (key, self.read(key)));
        if let Err(e) = self
            .storage
            .set_all(&[(TOKEN_KEY, grant.token.as_str()), (USER_KEY, snapshot.as_str())])
        {
            // Never leave a token without its user or the reverse
            self.restore(&previous);
            return Err(e.into());
        }

        info!(user_id = %grant.user.id, "Signed in as {}", grant.user.email);
        Ok(grant)
    }

    /// Forget the stored session. Idempotent and offline.
    pub fn logout(&self) -> Result<()> {
        self.storage.remove_all(&[TOKEN_KEY, USER_KEY])?;
        info!("Signed out");
        Ok(())
    }

    /// The cached user snapshot, or `None` when missing or unreadable
    pub fn current_user(&self) -> Option<User> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring malformed user snapshot: {e}");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// A client carrying the stored token, or `NotAuthenticated` without one
    pub fn authenticated_client(&self) -> Result<AuthenticatedRosterClient> {
        self.token()
            .map(|token| self.client.authenticate(token))
            .ok_or(ConsoleError::NotAuthenticated)
    }

    /// Put entries back as they were before a failed write
    fn restore(&self, entries: &[(&str, Option<String>)]) {
        for (key, value) in entries {
            let result = match value {
                Some(value) => self.storage.set(key, value),
                None => self.storage.remove(key),
            };
            if let Err(e) = result {
                warn!("Failed to restore session entry {key} after storage error: {e}");
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read session entry {key}: {e}");
                None
            }
        }
    }
}
