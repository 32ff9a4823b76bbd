use std::sync::Arc;

use warden_core::{AppError, RecordId};
use warden_domain::{
    ACTION_FIELD, DESCRIPTION_FIELD, Permission, PermissionAction, PermissionDraft,
    SCREEN_NAME_FIELD,
};

use crate::PageQuery;
use crate::test_support::{FakePermissionRegistry, session};

use super::PermissionService;

fn draft(screen_name: &str, action: PermissionAction, description: &str) -> PermissionDraft {
    PermissionDraft::new(screen_name, Some(action), description)
}

#[tokio::test]
async fn created_permission_carries_derived_key() {
    let registry = Arc::new(FakePermissionRegistry::default());
    let service = PermissionService::new(registry);

    let created = service
        .create_permission(
            &session(),
            &draft("pg_location", PermissionAction::Edit, "edit locations"),
        )
        .await;

    assert!(created.is_ok_and(|permission| permission.key().as_str() == "pg_location_edit"));
}

#[tokio::test]
async fn invalid_single_permission_collects_every_field_error() {
    let registry = Arc::new(FakePermissionRegistry::default());
    let service = PermissionService::new(registry.clone());

    let result = service
        .create_permission(&session(), &PermissionDraft::new("9lives", None, " "))
        .await;

    let Err(AppError::InvalidFields(errors)) = result else {
        panic!("expected field errors");
    };
    assert_eq!(
        errors.get("screen_name"),
        Some("Screen name must start with a letter and contain only letters, numbers, and underscores")
    );
    assert_eq!(errors.get("action"), Some("Action is required"));
    assert_eq!(errors.get("description"), Some("Description is required"));
    assert_eq!(registry.calls().await, 0);
}

#[tokio::test]
async fn bulk_create_reports_every_invalid_row_without_calling_registry() {
    let registry = Arc::new(FakePermissionRegistry::default());
    let service = PermissionService::new(registry.clone());
    let rows = vec![
        draft("ticket", PermissionAction::View, "view tickets"),
        draft("", PermissionAction::Create, "missing screen"),
        draft("ticket", PermissionAction::Edit, ""),
    ];

    let result = service.create_permissions(&session(), &rows).await;

    let Err(AppError::InvalidRows(errors)) = result else {
        panic!("expected row errors");
    };
    assert_eq!(errors.rows().collect::<Vec<_>>(), vec![1, 2]);
    assert!(errors.get(1).is_some_and(|row| row.contains("screen_name")));
    assert!(errors.get(2).is_some_and(|row| row.contains("description")));
    assert_eq!(registry.calls().await, 0);
}

#[tokio::test]
async fn bulk_create_with_a_blank_row_next_to_a_valid_one_is_blocked() {
    let registry = Arc::new(FakePermissionRegistry::default());
    let service = PermissionService::new(registry.clone());
    let rows = vec![
        PermissionDraft::default(),
        draft("user", PermissionAction::View, "list users"),
    ];

    let result = service.create_permissions(&session(), &rows).await;

    let Err(AppError::InvalidRows(errors)) = result else {
        panic!("expected row errors");
    };
    assert_eq!(errors.rows().collect::<Vec<_>>(), vec![0]);
    let Some(row) = errors.get(0) else {
        panic!("row 0 should carry errors");
    };
    let mut fields = row.iter().map(|(field, _)| field).collect::<Vec<_>>();
    fields.sort_unstable();
    assert_eq!(fields, vec![DESCRIPTION_FIELD, SCREEN_NAME_FIELD]);
    assert!(!row.contains(ACTION_FIELD));
    assert_eq!(registry.calls().await, 0);
}

#[tokio::test]
async fn all_blank_batch_is_refused_locally() {
    let registry = Arc::new(FakePermissionRegistry::default());
    let service = PermissionService::new(registry.clone());

    let result = service
        .create_permissions(
            &session(),
            &[PermissionDraft::default(), PermissionDraft::default()],
        )
        .await;

    assert!(matches!(result, Err(AppError::NoValidRows)));
    assert_eq!(registry.calls().await, 0);
}

#[tokio::test]
async fn valid_rows_are_sent_as_one_batch() {
    let registry = Arc::new(FakePermissionRegistry::default());
    let service = PermissionService::new(registry.clone());
    let rows = vec![
        draft("ticket", PermissionAction::View, "view tickets"),
        draft("ticket", PermissionAction::Delete, "delete tickets"),
        draft("user", PermissionAction::Create, "invite users"),
    ];

    let created = service.create_permissions(&session(), &rows).await;

    let Ok(created) = created else {
        panic!("batch should be created");
    };
    let keys = created
        .iter()
        .map(|permission| permission.key().as_str().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["ticket_view", "ticket_delete", "user_create"]);
    assert_eq!(registry.bulk_batches().await, vec![3]);
}

#[tokio::test]
async fn batch_rejection_surfaces_server_message() {
    let registry = Arc::new(FakePermissionRegistry::rejecting(
        "Permission ticket_view already exists",
    ));
    let service = PermissionService::new(registry.clone());

    let result = service
        .create_permissions(
            &session(),
            &[draft("ticket", PermissionAction::View, "view tickets")],
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::Rejected(message)) if message == "Permission ticket_view already exists"
    ));
    assert_eq!(registry.calls().await, 1);
}

#[tokio::test]
async fn blank_description_update_is_refused_locally() {
    let registry = Arc::new(FakePermissionRegistry::default());
    let service = PermissionService::new(registry.clone());

    let result = service
        .update_permission_description(&session(), RecordId::new(1), "  ")
        .await;

    assert!(matches!(result, Err(AppError::InvalidFields(errors)) if errors.contains("description")));
    assert_eq!(registry.calls().await, 0);
}

#[tokio::test]
async fn deleted_permission_disappears_from_listing() {
    let stored = Permission {
        id: RecordId::new(3),
        screen_name: "report".to_owned(),
        action: PermissionAction::View,
        description: "view reports".to_owned(),
        created_at: None,
        updated_at: None,
    };
    let registry = Arc::new(FakePermissionRegistry::with_permissions(vec![stored]));
    let service = PermissionService::new(registry);

    assert!(
        service
            .delete_permission(&session(), RecordId::new(3))
            .await
            .is_ok()
    );
    let page = service
        .list_permissions(&session(), PageQuery::first(12))
        .await;

    assert!(page.is_ok_and(|page| page.items.is_empty()));
}
