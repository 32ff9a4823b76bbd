use serde::Serialize;
use warden_application::{ROLE_PAGE_LIMIT, RoleForm, RoleQuery};
use warden_core::AppResult;
use warden_domain::{PermissionCatalogEntry, PermissionKey, Role};

use super::page_query;
use crate::cli::RoleCommand;
use crate::console_services::ConsoleServices;
use crate::output::{print_json, report_validation};

#[derive(Serialize)]
struct CatalogGrant<'a> {
    permission_key: &'a PermissionKey,
    description: &'a str,
    granted: bool,
}

#[derive(Serialize)]
struct RoleWithCatalog<'a> {
    role: &'a Role,
    catalog: Vec<CatalogGrant<'a>>,
    keys_outside_catalog: Vec<&'a PermissionKey>,
}

pub async fn run(services: &ConsoleServices, command: RoleCommand) -> AppResult<()> {
    let session = services.require_session().await?;
    let roles = &services.roles;

    match command {
        RoleCommand::List { list, status } => {
            let query = RoleQuery {
                page: page_query(list, ROLE_PAGE_LIMIT),
                status,
            };
            print_json(&roles.list_roles(&session, query).await?)
        }
        RoleCommand::Show { id, catalog } => {
            let role = roles.find_role(&session, id).await?;
            if !catalog {
                return print_json(&role);
            }

            let entries = services
                .permissions
                .list_permission_catalog(&session)
                .await?;
            print_json(&with_catalog(&role, &entries))
        }
        RoleCommand::Create {
            name,
            status,
            grants,
        } => {
            let mut form = RoleForm::create();
            form.set_role_name(name);
            form.set_status(status);
            for key in &grants {
                form.toggle_permission(key.as_str(), true);
            }

            let created = form
                .submit(roles, &session)
                .await
                .inspect_err(report_validation)?;
            print_json(&created)
        }
        RoleCommand::Update { id, name, status } => {
            let role = roles.find_role(&session, id).await?;
            let mut form = RoleForm::edit(&role);
            if let Some(name) = name {
                form.set_role_name(name);
            }
            if let Some(status) = status {
                form.set_status(status);
            }

            let updated = form
                .submit(roles, &session)
                .await
                .inspect_err(report_validation)?;
            print_json(&updated)
        }
        RoleCommand::Grant { id, key } => {
            let role = roles
                .set_permission(&session, id, PermissionKey::from_raw(key), true)
                .await?;
            print_json(&role)
        }
        RoleCommand::Revoke { id, key } => {
            let role = roles
                .set_permission(&session, id, PermissionKey::from_raw(key), false)
                .await?;
            print_json(&role)
        }
        RoleCommand::Delete { id } => {
            roles.delete_role(&session, id).await?;
            eprintln!("Role {id} deleted.");
            Ok(())
        }
    }
}

fn with_catalog<'a>(role: &'a Role, entries: &'a [PermissionCatalogEntry]) -> RoleWithCatalog<'a> {
    let catalog = role
        .permissions
        .against_catalog(entries)
        .into_iter()
        .map(|(entry, granted)| CatalogGrant {
            permission_key: &entry.permission_key,
            description: entry.description.as_str(),
            granted,
        })
        .collect();

    RoleWithCatalog {
        role,
        catalog,
        keys_outside_catalog: role.permissions.keys_outside(entries),
    }
}
