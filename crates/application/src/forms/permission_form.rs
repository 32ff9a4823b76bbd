use warden_core::{AppError, AppResult, FieldErrors};
use warden_domain::{
    ACTION_FIELD, DESCRIPTION_FIELD, Permission, PermissionAction, PermissionDraft, PermissionKey,
    SCREEN_NAME_FIELD,
};

use super::{FormMode, SubmissionGuard, general_message};
use crate::{AdminSession, PermissionService};

/// Single permission create/edit form.
///
/// In edit mode the screen name and action are fixed; only the description
/// is editable and submitted.
#[derive(Debug)]
pub struct PermissionForm {
    mode: FormMode,
    draft: PermissionDraft,
    errors: FieldErrors,
    general_error: Option<String>,
    guard: SubmissionGuard,
}

impl PermissionForm {
    /// Creates an empty form for a new permission.
    #[must_use]
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create, PermissionDraft::default())
    }

    /// Creates a form editing an existing permission's description.
    #[must_use]
    pub fn edit(permission: &Permission) -> Self {
        Self::with_mode(
            FormMode::Edit(permission.id),
            PermissionDraft::new(
                permission.screen_name.clone(),
                Some(permission.action),
                permission.description.clone(),
            ),
        )
    }

    fn with_mode(mode: FormMode, draft: PermissionDraft) -> Self {
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
    pub fn draft(&self) -> &PermissionDraft {
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

    /// Returns the key the current input derives, when valid.
    #[must_use]
    pub fn key_preview(&self) -> Option<PermissionKey> {
        self.draft.key_preview()
    }

    /// Sets the screen name of a new permission.
    pub fn set_screen_name(&mut self, value: impl Into<String>) -> AppResult<()> {
        self.ensure_creating(SCREEN_NAME_FIELD)?;
        self.draft.screen_name = value.into();
        self.errors.remove(SCREEN_NAME_FIELD);
        Ok(())
    }

    /// Sets the action of a new permission.
    pub fn set_action(&mut self, action: Option<PermissionAction>) -> AppResult<()> {
        self.ensure_creating(ACTION_FIELD)?;
        self.draft.action = action;
        self.errors.remove(ACTION_FIELD);
        Ok(())
    }

    /// Sets the description.
    pub fn set_description(&mut self, value: impl Into<String>) {
        self.draft.description = value.into();
        self.errors.remove(DESCRIPTION_FIELD);
    }

    fn ensure_creating(&self, field: &str) -> AppResult<()> {
        match self.mode {
            FormMode::Create => Ok(()),
            FormMode::Edit(_) => Err(AppError::Validation(format!(
                "{field} cannot be changed after creation"
            ))),
        }
    }

    /// Submits the form; field errors are kept on the form for display.
    pub async fn submit(
        &mut self,
        service: &PermissionService,
        session: &AdminSession,
    ) -> AppResult<Permission> {
        let guard = self.guard.clone();
        let _in_flight = guard.try_begin("permission save")?;
        self.errors = FieldErrors::new();
        self.general_error = None;

        let result = match self.mode {
            FormMode::Create => service.create_permission(session, &self.draft).await,
            FormMode::Edit(permission_id) => {
                service
                    .update_permission_description(
                        session,
                        permission_id,
                        self.draft.description.as_str(),
                    )
                    .await
            }
        };

        result.inspect_err(|error| match error {
            AppError::InvalidFields(errors) => self.errors = errors.clone(),
            other => {
                self.general_error = Some(general_message(other, "Failed to save permission"));
            }
        })
    }
}
