use async_trait::async_trait;
use serde::Serialize;

use warden_core::{AppResult, RecordId};
use warden_domain::{Role, RoleDefinition, RoleStatus};

use crate::{AdminSession, Page, PageQuery};

/// Default page size of the role listing.
pub const ROLE_PAGE_LIMIT: u32 = 10;

/// Role listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleQuery {
    /// Page selection and search term.
    #[serde(flatten)]
    pub page: PageQuery,
    /// Only roles with this status; `None` lists all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoleStatus>,
}

impl Default for RoleQuery {
    fn default() -> Self {
        Self {
            page: PageQuery::first(ROLE_PAGE_LIMIT),
            status: None,
        }
    }
}

/// Port for remote role administration.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists one page of roles.
    async fn list_roles(&self, session: &AdminSession, query: RoleQuery) -> AppResult<Page<Role>>;

    /// Fetches one role.
    async fn find_role(&self, session: &AdminSession, role_id: RecordId) -> AppResult<Role>;

    /// Creates a role.
    async fn create_role(
        &self,
        session: &AdminSession,
        definition: RoleDefinition,
    ) -> AppResult<Role>;

    /// Replaces name, status and permission mapping of a role.
    async fn update_role(
        &self,
        session: &AdminSession,
        role_id: RecordId,
        definition: RoleDefinition,
    ) -> AppResult<Role>;

    /// Deletes a role.
    async fn delete_role(&self, session: &AdminSession, role_id: RecordId) -> AppResult<()>;
}
