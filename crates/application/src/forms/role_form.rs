use warden_core::{AppError, AppResult, FieldErrors};
use warden_domain::{
    PermissionCatalogEntry, PermissionKey, ROLE_NAME_FIELD, Role, RoleDraft, RoleStatus,
};

use super::{FormMode, SubmissionGuard, general_message};
use crate::{AdminSession, RoleService};

/// Role create/edit form with per-key permission toggles.
#[derive(Debug)]
pub struct RoleForm {
    mode: FormMode,
    draft: RoleDraft,
    errors: FieldErrors,
    general_error: Option<String>,
    guard: SubmissionGuard,
}

impl RoleForm {
    /// Creates an empty `ACTIVE` role form.
    #[must_use]
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create, RoleDraft::default())
    }

    /// Creates a form editing a stored role, keeping its whole mapping.
    #[must_use]
    pub fn edit(role: &Role) -> Self {
        Self::with_mode(FormMode::Edit(role.id), RoleDraft::from_role(role))
    }

    fn with_mode(mode: FormMode, draft: RoleDraft) -> Self {
        Self {
            mode,
            draft,
            errors: FieldErrors::new(),
            general_error: None,
            guard: SubmissionGuard::new(),
        }
    }

    /// Returns whether the form creates or edits.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Returns the current input.
    #[must_use]
    pub fn draft(&self) -> &RoleDraft {
        &self.draft
    }

    /// Returns field errors of the last submission.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Returns the form-level error of the last submission.
    #[must_use]
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Returns a handle observing this form's in-flight state.
    #[must_use]
    pub fn submission_guard(&self) -> SubmissionGuard {
        self.guard.clone()
    }

    /// Sets the role name.
    pub fn set_role_name(&mut self, value: impl Into<String>) {
        self.draft.role_name = value.into();
        self.errors.remove(ROLE_NAME_FIELD);
    }

    /// Sets the status.
    pub fn set_status(&mut self, status: RoleStatus) {
        self.draft.status = status;
    }

    /// Grants or revokes one key without affecting other entries.
    pub fn toggle_permission(&mut self, key: impl Into<PermissionKey>, granted: bool) {
        self.draft.toggle(key, granted);
    }

    /// Pairs each catalog entry with its current toggle state.
    #[must_use]
    pub fn assignment<'a>(
        &self,
        catalog: &'a [PermissionCatalogEntry],
    ) -> Vec<(&'a PermissionCatalogEntry, bool)> {
        self.draft.permissions.against_catalog(catalog)
    }

    /// Submits the form; field errors are kept on the form for display.
    pub async fn submit(&mut self, service: &RoleService, session: &AdminSession) -> AppResult<Role> {
        let guard = self.guard.clone();
        let _in_flight = guard.try_begin("role save")?;
        self.errors = FieldErrors::new();
        self.general_error = None;

        let result = match self.mode {
            FormMode::Create => service.create_role(session, &self.draft).await,
            FormMode::Edit(role_id) => service.update_role(session, role_id, &self.draft).await,
        };

        result.inspect_err(|error| match error {
            AppError::InvalidFields(errors) => self.errors = errors.clone(),
            other => self.general_error = Some(general_message(other, "Failed to save role")),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warden_core::{AppError, RecordId};
    use warden_domain::{PermissionCatalogEntry, PermissionKey, RolePermissions, RoleStatus};

    use crate::RoleService;
    use crate::test_support::{FakeRoleRepository, session};

    use super::{FormMode, RoleForm};

    #[tokio::test]
    async fn editing_preserves_keys_outside_the_catalog() {
        let repository = Arc::new(FakeRoleRepository::default());
        let service = RoleService::new(repository);
        let mut create = RoleForm::create();
        create.set_role_name("support");
        create.toggle_permission("ticket_edit", true);
        create.toggle_permission("retired_report_view", true);
        let Ok(stored) = create.submit(&service, &session()).await else {
            panic!("role should be created");
        };

        let mut edit = RoleForm::edit(&stored);
        assert_eq!(edit.mode(), FormMode::Edit(stored.id));
        let catalog = vec![PermissionCatalogEntry {
            id: RecordId::new(1),
            permission_key: PermissionKey::from_raw("user_view"),
            description: "view users".to_owned(),
        }];
        assert_eq!(edit.assignment(&catalog).len(), 1);
        edit.toggle_permission("user_view", true);
        let updated = edit.submit(&service, &session()).await;

        let expected = RolePermissions::from_iter([
            ("retired_report_view", true),
            ("ticket_edit", true),
            ("user_view", true),
        ]);
        assert!(updated.is_ok_and(|role| role.permissions == expected));
    }

    #[tokio::test]
    async fn missing_role_name_is_reported_on_the_field() {
        let repository = Arc::new(FakeRoleRepository::default());
        let service = RoleService::new(repository.clone());
        let mut form = RoleForm::create();

        let result = form.submit(&service, &session()).await;

        assert!(matches!(result, Err(AppError::InvalidFields(_))));
        assert_eq!(form.errors().get("role_name"), Some("Role name is required"));
        assert_eq!(repository.write_calls().await, 0);

        form.set_role_name("auditor");
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn defaults_to_active_status() {
        let service = RoleService::new(Arc::new(FakeRoleRepository::default()));
        let mut form = RoleForm::create();
        form.set_role_name("auditor");

        let created = form.submit(&service, &session()).await;

        assert!(created.is_ok_and(|role| role.status == RoleStatus::Active
            && role.permissions.is_empty()));
    }

    #[tokio::test]
    async fn busy_form_does_not_reach_the_api() {
        let repository = Arc::new(FakeRoleRepository::default());
        let service = RoleService::new(repository.clone());
        let mut form = RoleForm::create();
        form.set_role_name("auditor");
        let _held = form.submission_guard().try_begin("role save");

        let result = form.submit(&service, &session()).await;

        assert!(matches!(result, Err(AppError::Busy(_))));
        assert_eq!(repository.write_calls().await, 0);
    }
}
