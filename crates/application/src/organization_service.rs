use std::sync::Arc;

use async_trait::async_trait;

use warden_core::AppResult;
use warden_domain::{Organization, OrganizationDirectory};

use crate::AdminSession;

/// Listing size used to resolve organization ids on tickets.
pub const DIRECTORY_LISTING_LIMIT: u32 = 100;

/// Port for the remote organization listing.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Lists organizations with their locations and administrators.
    async fn list_organizations(
        &self,
        session: &AdminSession,
        limit: Option<u32>,
    ) -> AppResult<Vec<Organization>>;
}

/// Application service for the organization directory.
#[derive(Clone)]
pub struct OrganizationService {
    repository: Arc<dyn OrganizationRepository>,
}

impl OrganizationService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn OrganizationRepository>) -> Self {
        Self { repository }
    }

    /// Returns every organization the API lists by default.
    pub async fn list_organizations(&self, session: &AdminSession) -> AppResult<Vec<Organization>> {
        self.repository.list_organizations(session, None).await
    }

    /// Returns a lookup table for resolving ids shown on tickets.
    pub async fn directory(&self, session: &AdminSession) -> AppResult<OrganizationDirectory> {
        let organizations = self
            .repository
            .list_organizations(session, Some(DIRECTORY_LISTING_LIMIT))
            .await?;

        Ok(OrganizationDirectory::new(organizations))
    }
}
