use std::sync::Arc;

use tracing::{info, warn};
use warden_core::{AppError, AppResult, RecordId};
use warden_domain::{PermissionKey, Role, RoleDraft};

use crate::{AdminSession, Page, RoleQuery, RoleRepository};

/// Application service for role and permission assignment workflows.
#[derive(Clone)]
pub struct RoleService {
    repository: Arc<dyn RoleRepository>,
}

impl RoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// Returns one page of roles.
    pub async fn list_roles(
        &self,
        session: &AdminSession,
        query: RoleQuery,
    ) -> AppResult<Page<Role>> {
        self.repository.list_roles(session, query).await
    }

    /// Returns one role.
    pub async fn find_role(&self, session: &AdminSession, role_id: RecordId) -> AppResult<Role> {
        self.repository.find_role(session, role_id).await
    }

    /// Validates and creates a role.
    pub async fn create_role(&self, session: &AdminSession, draft: &RoleDraft) -> AppResult<Role> {
        let definition = draft.validate().map_err(AppError::InvalidFields)?;

        let role = self
            .repository
            .create_role(session, definition)
            .await
            .inspect_err(|error| {
                warn!(role_name = %draft.role_name, error = %error, "role create failed");
            })?;

        info!(
            role_id = %role.id,
            role_name = %role.role_name,
            grants = role.permissions.granted_keys().count(),
            "role created"
        );
        Ok(role)
    }

    /// Validates and replaces an existing role.
    pub async fn update_role(
        &self,
        session: &AdminSession,
        role_id: RecordId,
        draft: &RoleDraft,
    ) -> AppResult<Role> {
        let definition = draft.validate().map_err(AppError::InvalidFields)?;

        let role = self
            .repository
            .update_role(session, role_id, definition)
            .await
            .inspect_err(|error| {
                warn!(role_id = %role_id, error = %error, "role update failed");
            })?;

        info!(role_id = %role_id, role_name = %role.role_name, "role updated");
        Ok(role)
    }

    /// Grants or revokes one key on a stored role, keeping every other entry.
    pub async fn set_permission(
        &self,
        session: &AdminSession,
        role_id: RecordId,
        key: PermissionKey,
        granted: bool,
    ) -> AppResult<Role> {
        let role = self.repository.find_role(session, role_id).await?;
        let mut draft = RoleDraft::from_role(&role);
        draft.toggle(key, granted);

        self.update_role(session, role_id, &draft).await
    }

    /// Deletes a role.
    pub async fn delete_role(&self, session: &AdminSession, role_id: RecordId) -> AppResult<()> {
        self.repository.delete_role(session, role_id).await?;

        info!(role_id = %role_id, "role deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warden_core::{AppError, RecordId};
    use warden_domain::{PermissionKey, RoleDraft, RolePermissions, RoleStatus};

    use crate::test_support::{FakeRoleRepository, session};

    use super::RoleService;

    #[tokio::test]
    async fn blank_role_name_is_rejected_before_the_api() {
        let repository = Arc::new(FakeRoleRepository::default());
        let service = RoleService::new(repository.clone());

        let result = service.create_role(&session(), &RoleDraft::new(" ")).await;

        assert!(matches!(result, Err(AppError::InvalidFields(errors)) if errors.contains("role_name")));
        assert_eq!(repository.write_calls().await, 0);
    }

    #[tokio::test]
    async fn created_mapping_reads_back_equal() {
        let repository = Arc::new(FakeRoleRepository::default());
        let service = RoleService::new(repository);
        let mut draft = RoleDraft::new("support");
        draft.toggle("ticket_view", true);
        draft.toggle("ticket_edit", false);
        draft.toggle("user_view", true);

        let created = service.create_role(&session(), &draft).await;
        let Ok(created) = created else {
            panic!("role should be created");
        };
        let fetched = service.find_role(&session(), created.id).await;

        assert!(fetched.is_ok_and(|role| role.permissions == draft.permissions
            && role.status == RoleStatus::Active));
    }

    #[tokio::test]
    async fn set_permission_merges_into_stored_mapping() {
        let repository = Arc::new(FakeRoleRepository::default());
        let service = RoleService::new(repository.clone());
        let mut draft = RoleDraft::new("support");
        draft.toggle("ticket_edit", true);
        draft.toggle("legacy_export_view", true);
        let Ok(created) = service.create_role(&session(), &draft).await else {
            panic!("role should be created");
        };

        let updated = service
            .set_permission(
                &session(),
                created.id,
                PermissionKey::from_raw("user_view"),
                true,
            )
            .await;

        let expected = RolePermissions::from_iter([
            ("legacy_export_view", true),
            ("ticket_edit", true),
            ("user_view", true),
        ]);
        assert!(updated.is_ok_and(|role| role.permissions == expected));
    }

    #[tokio::test]
    async fn update_keeps_role_name_editable() {
        let repository = Arc::new(FakeRoleRepository::default());
        let service = RoleService::new(repository);
        let Ok(created) = service
            .create_role(&session(), &RoleDraft::new("support"))
            .await
        else {
            panic!("role should be created");
        };

        let mut draft = RoleDraft::new("tier-2 support");
        draft.status = RoleStatus::Inactive;
        let updated = service.update_role(&session(), created.id, &draft).await;

        assert!(updated.is_ok_and(|role| role.role_name == "tier-2 support"
            && role.status == RoleStatus::Inactive));
    }

    #[tokio::test]
    async fn unknown_role_surfaces_not_found() {
        let service = RoleService::new(Arc::new(FakeRoleRepository::default()));

        let result = service.find_role(&session(), RecordId::new(404)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
