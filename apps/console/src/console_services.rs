use std::sync::Arc;

use warden_application::{
    AdminSession, LoginFlow, OrganizationService, PermissionService, RoleService, SessionService,
    TicketService,
};
use warden_core::{AppError, AppResult};
use warden_infrastructure::{FileSessionStore, HttpAdminClient};

use crate::console_config::ConsoleConfig;

/// Services wired against the remote API and the session file.
#[derive(Clone)]
pub struct ConsoleServices {
    client: Arc<HttpAdminClient>,
    admin_role: String,
    pub sessions: SessionService,
    pub permissions: PermissionService,
    pub roles: RoleService,
    pub tickets: TicketService,
    pub organizations: OrganizationService,
}

impl ConsoleServices {
    pub fn build(config: &ConsoleConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
        let client = Arc::new(HttpAdminClient::new(
            http_client,
            config.api_base_url.clone(),
        ));
        let store = Arc::new(FileSessionStore::new(config.session_file.clone()));

        Ok(Self {
            client: client.clone(),
            admin_role: config.admin_role.clone(),
            sessions: SessionService::new(store),
            permissions: PermissionService::new(client.clone()),
            roles: RoleService::new(client.clone()),
            tickets: TicketService::new(client.clone()),
            organizations: OrganizationService::new(client),
        })
    }

    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(
            self.client.clone(),
            self.sessions.clone(),
            self.admin_role.clone(),
        )
    }

    /// Restores the stored session or fails with a sign-in hint.
    pub async fn require_session(&self) -> AppResult<AdminSession> {
        self.sessions.restore().await?.ok_or_else(|| {
            AppError::Unauthorized("not signed in".to_owned())
        })
    }
}
