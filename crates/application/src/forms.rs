//! Editable form state for permission and role workflows.
//!
//! A form owns its in-progress input, the errors of its last submission and
//! a [`SubmissionGuard`] allowing at most one in-flight create or update.

mod bulk_permission_form;
mod permission_form;
mod role_form;
mod submission_guard;

pub use bulk_permission_form::BulkPermissionForm;
pub use permission_form::PermissionForm;
pub use role_form::RoleForm;
pub use submission_guard::{InFlightSubmission, SubmissionGuard};

use warden_core::{AppError, RecordId};

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Submits a new record.
    Create,
    /// Submits changes to an existing record.
    Edit(RecordId),
}

fn general_message(error: &AppError, fallback: &str) -> String {
    match error {
        AppError::Busy(message) => message.clone(),
        other => other.server_message().unwrap_or(fallback).to_owned(),
    }
}
