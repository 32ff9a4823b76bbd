//! Permission registry use-cases.
//!
//! Every write is validated locally first; a request only reaches the
//! registry once all fields of all rows pass.

use std::sync::Arc;

use tracing::{info, warn};
use warden_core::{AppError, AppResult, RecordId, RowErrors};
use warden_domain::{Permission, PermissionCatalogEntry, PermissionDraft, validate_description};

use crate::{AdminSession, Page, PageQuery, PermissionRegistry};

#[cfg(test)]
mod tests;

/// Application service for permission registry workflows.
#[derive(Clone)]
pub struct PermissionService {
    registry: Arc<dyn PermissionRegistry>,
}

impl PermissionService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(registry: Arc<dyn PermissionRegistry>) -> Self {
        Self { registry }
    }

    /// Returns one page of permissions.
    pub async fn list_permissions(
        &self,
        session: &AdminSession,
        query: PageQuery,
    ) -> AppResult<Page<Permission>> {
        self.registry.list_permissions(session, query).await
    }

    /// Returns the full key catalog used for role assignment.
    pub async fn list_permission_catalog(
        &self,
        session: &AdminSession,
    ) -> AppResult<Vec<PermissionCatalogEntry>> {
        self.registry.list_permission_catalog(session).await
    }

    /// Validates and creates one permission.
    pub async fn create_permission(
        &self,
        session: &AdminSession,
        draft: &PermissionDraft,
    ) -> AppResult<Permission> {
        let definition = draft.validate().map_err(AppError::InvalidFields)?;
        let key = definition.key();

        let permission = self
            .registry
            .create_permission(session, definition)
            .await
            .inspect_err(|error| warn!(key = %key, error = %error, "permission create failed"))?;

        info!(permission_id = %permission.id, key = %key, "permission created");
        Ok(permission)
    }

    /// Validates every row and creates the non-blank ones as one batch.
    ///
    /// A batch made only of blank rows fails with [`AppError::NoValidRows`].
    /// Otherwise all invalid rows are reported together as
    /// [`AppError::InvalidRows`]. Neither case contacts the registry.
    pub async fn create_permissions(
        &self,
        session: &AdminSession,
        drafts: &[PermissionDraft],
    ) -> AppResult<Vec<Permission>> {
        if drafts.iter().all(PermissionDraft::is_blank) {
            return Err(AppError::NoValidRows);
        }

        let mut row_errors = RowErrors::new();
        let mut definitions = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.iter().enumerate() {
            match draft.validate() {
                Ok(definition) if draft.is_complete() => definitions.push(definition),
                Ok(_) => {}
                Err(errors) => row_errors.insert(index, errors),
            }
        }

        if !row_errors.is_empty() {
            return Err(AppError::InvalidRows(row_errors));
        }
        if definitions.is_empty() {
            return Err(AppError::NoValidRows);
        }

        let row_count = definitions.len();
        let created = self
            .registry
            .create_permissions(session, definitions)
            .await
            .inspect_err(|error| {
                warn!(rows = row_count, error = %error, "bulk permission create failed");
            })?;

        info!(rows = row_count, "permissions created in bulk");
        Ok(created)
    }

    /// Replaces the description of an existing permission.
    ///
    /// Screen name and action are immutable after creation and are never sent.
    pub async fn update_permission_description(
        &self,
        session: &AdminSession,
        permission_id: RecordId,
        description: &str,
    ) -> AppResult<Permission> {
        let description = validate_description(description).map_err(AppError::InvalidFields)?;

        let permission = self
            .registry
            .update_permission_description(session, permission_id, description)
            .await?;

        info!(permission_id = %permission_id, "permission description updated");
        Ok(permission)
    }

    /// Deletes a permission.
    pub async fn delete_permission(
        &self,
        session: &AdminSession,
        permission_id: RecordId,
    ) -> AppResult<()> {
        self.registry
            .delete_permission(session, permission_id)
            .await?;

        info!(permission_id = %permission_id, "permission deleted");
        Ok(())
    }
}
