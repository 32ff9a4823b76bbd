use std::path::Path;

use tracing::info;
use warden_application::{BulkPermissionForm, PERMISSION_PAGE_LIMIT, PermissionForm};
use warden_core::{AppError, AppResult};
use warden_domain::{PermissionDraft, group_by_screen};

use super::page_query;
use crate::cli::PermissionCommand;
use crate::console_services::ConsoleServices;
use crate::output::{print_json, report_validation};

pub async fn run(services: &ConsoleServices, command: PermissionCommand) -> AppResult<()> {
    let session = services.require_session().await?;
    let permissions = &services.permissions;

    match command {
        PermissionCommand::List { list, grouped } => {
            let page = permissions
                .list_permissions(&session, page_query(list, PERMISSION_PAGE_LIMIT))
                .await?;
            if grouped {
                print_json(&group_by_screen(&page.items))
            } else {
                print_json(&page)
            }
        }
        PermissionCommand::Catalog => {
            print_json(&permissions.list_permission_catalog(&session).await?)
        }
        PermissionCommand::Create {
            screen_name,
            action,
            description,
        } => {
            let mut form = PermissionForm::create();
            form.set_screen_name(screen_name)?;
            form.set_action(Some(action))?;
            form.set_description(description);

            let created = form
                .submit(permissions, &session)
                .await
                .inspect_err(report_validation)?;
            print_json(&created)
        }
        PermissionCommand::Bulk { file } => {
            let rows = read_rows(file.as_path()).await?;
            let mut form = BulkPermissionForm::from_rows(rows);

            let created = form
                .submit(permissions, &session)
                .await
                .inspect_err(report_validation)?;
            info!(rows = form.rows().len(), "bulk permission file submitted");
            print_json(&created)
        }
        PermissionCommand::Update { id, description } => {
            let updated = permissions
                .update_permission_description(&session, id, description.as_str())
                .await
                .inspect_err(report_validation)?;
            print_json(&updated)
        }
        PermissionCommand::Delete { id } => {
            permissions.delete_permission(&session, id).await?;
            eprintln!("Permission {id} deleted.");
            Ok(())
        }
    }
}

async fn read_rows(path: &Path) -> AppResult<Vec<PermissionDraft>> {
    let contents = tokio::fs::read(path).await.map_err(|error| {
        AppError::Validation(format!("failed to read '{}': {error}", path.display()))
    })?;

    serde_json::from_slice(&contents).map_err(|error| {
        AppError::Validation(format!(
            "'{}' is not a JSON array of permission rows: {error}",
            path.display()
        ))
    })
}
