//! Authenticated session context and its persistence.
//!
//! The session is an explicit value handed to every authorized operation. It
//! is created once by passcode login or by restoring persisted state at
//! process start, and torn down by logout.

use std::sync::Arc;

use tracing::{info, warn};
use warden_core::{AccessToken, AdminIdentity, AppError, AppResult};

use crate::{ACCESS_TOKEN_KEY, IDENTITY_KEY, ORGANIZATION_ID_KEY, SessionStore, USER_ID_KEY};

/// Signed-in administrator and the token authorizing their requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    identity: AdminIdentity,
    access_token: AccessToken,
}

impl AdminSession {
    /// Creates a session from a verified identity.
    #[must_use]
    pub fn new(identity: AdminIdentity, access_token: AccessToken) -> Self {
        Self {
            identity,
            access_token,
        }
    }

    /// Returns the signed-in identity.
    #[must_use]
    pub fn identity(&self) -> &AdminIdentity {
        &self.identity
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

/// Persists, restores and clears the client session.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
}

impl SessionService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Rebuilds the session persisted by a previous login, if any.
    pub async fn restore(&self) -> AppResult<Option<AdminSession>> {
        let Some(access_token) = self.store.get(ACCESS_TOKEN_KEY).await? else {
            return Ok(None);
        };
        let Some(identity) = self.store.get(IDENTITY_KEY).await? else {
            warn!("persisted session has a token but no identity; ignoring it");
            return Ok(None);
        };

        match serde_json::from_str::<AdminIdentity>(identity.as_str()) {
            Ok(identity) => Ok(Some(AdminSession::new(
                identity,
                AccessToken::new(access_token),
            ))),
            Err(error) => {
                warn!(error = %error, "persisted identity is unreadable; ignoring session");
                Ok(None)
            }
        }
    }

    /// Persists a freshly verified session.
    ///
    /// The token is written last. If any write fails, every session key is
    /// cleared again so no token is left behind for a failed login.
    pub async fn establish(
        &self,
        identity: AdminIdentity,
        access_token: AccessToken,
    ) -> AppResult<AdminSession> {
        if let Err(error) = self.persist(&identity, &access_token).await {
            warn!(error = %error, "session could not be persisted; clearing partial state");
            if let Err(cleanup_error) = self.teardown().await {
                warn!(error = %cleanup_error, "failed to clear partial session");
            }
            return Err(error);
        }

        info!(user_id = %identity.user_id(), role = %identity.role_name(), "session established");
        Ok(AdminSession::new(identity, access_token))
    }

    async fn persist(&self, identity: &AdminIdentity, access_token: &AccessToken) -> AppResult<()> {
        let encoded_identity = serde_json::to_string(identity).map_err(|error| {
            AppError::Internal(format!("failed to encode session identity: {error}"))
        })?;

        self.store
            .set(USER_ID_KEY, identity.user_id().to_string().as_str())
            .await?;
        match identity.organization_id() {
            Some(organization_id) => {
                self.store
                    .set(ORGANIZATION_ID_KEY, organization_id.to_string().as_str())
                    .await?;
            }
            None => self.store.remove(ORGANIZATION_ID_KEY).await?,
        }
        self.store
            .set(IDENTITY_KEY, encoded_identity.as_str())
            .await?;
        self.store
            .set(ACCESS_TOKEN_KEY, access_token.expose())
            .await
    }

    /// Clears every persisted session key.
    pub async fn teardown(&self) -> AppResult<()> {
        for key in [
            ACCESS_TOKEN_KEY,
            USER_ID_KEY,
            ORGANIZATION_ID_KEY,
            IDENTITY_KEY,
        ] {
            self.store.remove(key).await?;
        }

        info!("session cleared");
        Ok(())
    }
}
