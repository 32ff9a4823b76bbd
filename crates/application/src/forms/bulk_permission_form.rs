use warden_core::{AppError, AppResult, RowErrors};
use warden_domain::{
    ACTION_FIELD, DESCRIPTION_FIELD, Permission, PermissionAction, PermissionDraft,
    SCREEN_NAME_FIELD,
};

use super::{SubmissionGuard, general_message};
use crate::{AdminSession, PermissionService};

const NO_VALID_ROWS: &str = "Please add at least one permission";

/// Multi-row permission creation form.
#[derive(Debug)]
pub struct BulkPermissionForm {
    rows: Vec<PermissionDraft>,
    errors: RowErrors,
    general_error: Option<String>,
    guard: SubmissionGuard,
}

impl Default for BulkPermissionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkPermissionForm {
    /// Creates a form with one blank `CREATE` row.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rows(Vec::new())
    }

    /// Creates a form pre-filled with rows; an empty list yields one blank row.
    #[must_use]
    pub fn from_rows(rows: Vec<PermissionDraft>) -> Self {
        let rows = if rows.is_empty() {
            vec![PermissionDraft::default()]
        } else {
            rows
        };

        Self {
            rows,
            errors: RowErrors::new(),
            general_error: None,
            guard: SubmissionGuard::new(),
        }
    }

    /// Returns the rows in order.
    #[must_use]
    pub fn rows(&self) -> &[PermissionDraft] {
        self.rows.as_slice()
    }

    /// Returns per-row errors of the last submission.
    #[must_use]
    pub fn errors(&self) -> &RowErrors {
        &self.errors
    }

    /// Returns the batch-level error of the last submission.
    #[must_use]
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Returns a handle observing this form's in-flight state.
    #[must_use]
    pub fn submission_guard(&self) -> SubmissionGuard {
        self.guard.clone()
    }

    /// Appends a blank `CREATE` row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(PermissionDraft::default());
        self.rows.len() - 1
    }

    /// Removes a row. The last remaining row cannot be removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }

        self.rows.remove(index);
        self.errors.remove_row(index);
        true
    }

    /// Sets the screen name of a row.
    pub fn set_screen_name(&mut self, index: usize, value: impl Into<String>) -> AppResult<()> {
        self.row_mut(index)?.screen_name = value.into();
        self.errors.clear_field(index, SCREEN_NAME_FIELD);
        Ok(())
    }

    /// Sets the action of a row.
    pub fn set_action(&mut self, index: usize, action: Option<PermissionAction>) -> AppResult<()> {
        self.row_mut(index)?.action = action;
        self.errors.clear_field(index, ACTION_FIELD);
        Ok(())
    }

    /// Sets the description of a row.
    pub fn set_description(&mut self, index: usize, value: impl Into<String>) -> AppResult<()> {
        self.row_mut(index)?.description = value.into();
        self.errors.clear_field(index, DESCRIPTION_FIELD);
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> AppResult<&mut PermissionDraft> {
        self.rows
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("row {} does not exist", index + 1)))
    }

    /// Validates all rows and submits the non-blank ones as one batch.
    pub async fn submit(
        &mut self,
        service: &PermissionService,
        session: &AdminSession,
    ) -> AppResult<Vec<Permission>> {
        let guard = self.guard.clone();
        let _in_flight = guard.try_begin("bulk permission create")?;
        self.errors = RowErrors::new();
        self.general_error = None;

        let result = service.create_permissions(session, &self.rows).await;

        result.inspect_err(|error| match error {
            AppError::InvalidRows(errors) => self.errors = errors.clone(),
            AppError::NoValidRows => self.general_error = Some(NO_VALID_ROWS.to_owned()),
            other => {
                self.general_error =
                    Some(general_message(other, "Failed to create permissions"));
            }
        })
    }
}
