use async_trait::async_trait;

use warden_core::{AppResult, NonEmptyString, RecordId};
use warden_domain::{Permission, PermissionCatalogEntry, PermissionDefinition};

use crate::{AdminSession, Page, PageQuery};

/// Default page size of the permission listing.
pub const PERMISSION_PAGE_LIMIT: u32 = 12;

/// Port for the remote permission registry.
#[async_trait]
pub trait PermissionRegistry: Send + Sync {
    /// Lists one page of permissions matching the query.
    async fn list_permissions(
        &self,
        session: &AdminSession,
        query: PageQuery,
    ) -> AppResult<Page<Permission>>;

    /// Lists every permission as a flat key catalog.
    async fn list_permission_catalog(
        &self,
        session: &AdminSession,
    ) -> AppResult<Vec<PermissionCatalogEntry>>;

    /// Creates one permission.
    async fn create_permission(
        &self,
        session: &AdminSession,
        definition: PermissionDefinition,
    ) -> AppResult<Permission>;

    /// Creates many permissions as one atomic batch.
    async fn create_permissions(
        &self,
        session: &AdminSession,
        definitions: Vec<PermissionDefinition>,
    ) -> AppResult<Vec<Permission>>;

    /// Replaces the description of a permission.
    async fn update_permission_description(
        &self,
        session: &AdminSession,
        permission_id: RecordId,
        description: NonEmptyString,
    ) -> AppResult<Permission>;

    /// Deletes a permission. Roles referencing its key are left untouched.
    async fn delete_permission(&self, session: &AdminSession, permission_id: RecordId)
    -> AppResult<()>;
}
