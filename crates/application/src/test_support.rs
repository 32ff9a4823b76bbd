use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use warden_core::{AccessToken, AdminIdentity, AppError, AppResult, NonEmptyString, RecordId};
use warden_domain::{
    Permission, PermissionCatalogEntry, PermissionDefinition, Role, RoleDefinition, Ticket,
    TicketStats, TicketStatus,
};

use crate::{
    AdminSession, AuthGateway, OtpVerification, Page, PageQuery, PermissionRegistry, RoleQuery,
    RoleRepository, SessionStore, TicketQuery, TicketRepository,
};

pub fn session() -> AdminSession {
    AdminSession::new(
        AdminIdentity::new(RecordId::new(1), "Root", "SUPER_ADMIN", None),
        AccessToken::new("test-token"),
    )
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    failing_key: Option<String>,
}

impl MemoryStore {
    pub fn failing_on(key: &str) -> Self {
        Self {
            failing_key: Some(key.to_owned()),
            ..Self::default()
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.values.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if self.failing_key.as_deref() == Some(key) {
            return Err(AppError::Internal(format!("cannot write {key}")));
        }
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePermissionRegistry {
    permissions: Mutex<Vec<Permission>>,
    calls: Mutex<usize>,
    bulk_batches: Mutex<Vec<usize>>,
    rejection: Option<String>,
}

impl FakePermissionRegistry {
    pub fn with_permissions(permissions: Vec<Permission>) -> Self {
        Self {
            permissions: Mutex::new(permissions),
            ..Self::default()
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            rejection: Some(message.to_owned()),
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }

    pub async fn bulk_batches(&self) -> Vec<usize> {
        self.bulk_batches.lock().await.clone()
    }

    async fn record_call(&self) -> AppResult<()> {
        *self.calls.lock().await += 1;
        match &self.rejection {
            Some(message) => Err(AppError::Rejected(message.clone())),
            None => Ok(()),
        }
    }

    async fn store(&self, definition: &PermissionDefinition) -> Permission {
        let mut permissions = self.permissions.lock().await;
        let next_id = permissions
            .iter()
            .map(|permission| permission.id.value())
            .max()
            .unwrap_or(0)
            + 1;
        let permission = Permission {
            id: RecordId::new(next_id),
            screen_name: definition.screen_name().as_str().to_owned(),
            action: definition.action(),
            description: definition.description().as_str().to_owned(),
            created_at: None,
            updated_at: None,
        };
        permissions.push(permission.clone());
        permission
    }
}

#[async_trait]
impl PermissionRegistry for FakePermissionRegistry {
    async fn list_permissions(
        &self,
        _session: &AdminSession,
        query: PageQuery,
    ) -> AppResult<Page<Permission>> {
        self.record_call().await?;
        let permissions = self.permissions.lock().await;
        let items = permissions
            .iter()
            .filter(|permission| {
                query.search.as_deref().is_none_or(|term| {
                    permission.screen_name.contains(term) || permission.description.contains(term)
                })
            })
            .cloned()
            .collect();

        Ok(Page { items, info: None })
    }

    async fn list_permission_catalog(
        &self,
        _session: &AdminSession,
    ) -> AppResult<Vec<PermissionCatalogEntry>> {
        self.record_call().await?;
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .map(|permission| PermissionCatalogEntry {
                id: permission.id,
                permission_key: permission.key(),
                description: permission.description.clone(),
            })
            .collect())
    }

    async fn create_permission(
        &self,
        _session: &AdminSession,
        definition: PermissionDefinition,
    ) -> AppResult<Permission> {
        self.record_call().await?;
        Ok(self.store(&definition).await)
    }

    async fn create_permissions(
        &self,
        _session: &AdminSession,
        definitions: Vec<PermissionDefinition>,
    ) -> AppResult<Vec<Permission>> {
        self.record_call().await?;
        self.bulk_batches.lock().await.push(definitions.len());

        let mut created = Vec::with_capacity(definitions.len());
        for definition in &definitions {
            created.push(self.store(definition).await);
        }
        Ok(created)
    }

    async fn update_permission_description(
        &self,
        _session: &AdminSession,
        permission_id: RecordId,
        description: NonEmptyString,
    ) -> AppResult<Permission> {
        self.record_call().await?;
        let mut permissions = self.permissions.lock().await;
        let permission = permissions
            .iter_mut()
            .find(|permission| permission.id == permission_id)
            .ok_or_else(|| AppError::NotFound(format!("permission {permission_id} not found")))?;
        permission.description = description.into();
        Ok(permission.clone())
    }

    async fn delete_permission(
        &self,
        _session: &AdminSession,
        permission_id: RecordId,
    ) -> AppResult<()> {
        self.record_call().await?;
        self.permissions
            .lock()
            .await
            .retain(|permission| permission.id != permission_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeRoleRepository {
    roles: Mutex<Vec<Role>>,
    write_calls: Mutex<usize>,
}

impl FakeRoleRepository {
    pub async fn write_calls(&self) -> usize {
        *self.write_calls.lock().await
    }
}

fn role_from_definition(role_id: RecordId, definition: RoleDefinition) -> Role {
    Role {
        id: role_id,
        role_name: definition.role_name().as_str().to_owned(),
        status: definition.status(),
        permissions: definition.permissions().clone(),
        users_count: Some(0),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn list_roles(&self, _session: &AdminSession, query: RoleQuery) -> AppResult<Page<Role>> {
        let items = self
            .roles
            .lock()
            .await
            .iter()
            .filter(|role| query.status.is_none_or(|status| role.status == status))
            .cloned()
            .collect();

        Ok(Page { items, info: None })
    }

    async fn find_role(&self, _session: &AdminSession, role_id: RecordId) -> AppResult<Role> {
        self.roles
            .lock()
            .await
            .iter()
            .find(|role| role.id == role_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("role {role_id} not found")))
    }

    async fn create_role(
        &self,
        _session: &AdminSession,
        definition: RoleDefinition,
    ) -> AppResult<Role> {
        *self.write_calls.lock().await += 1;
        let mut roles = self.roles.lock().await;
        let role_id = RecordId::new(i64::try_from(roles.len()).unwrap_or(i64::MAX) + 1);
        let role = role_from_definition(role_id, definition);
        roles.push(role.clone());
        Ok(role)
    }

    async fn update_role(
        &self,
        _session: &AdminSession,
        role_id: RecordId,
        definition: RoleDefinition,
    ) -> AppResult<Role> {
        *self.write_calls.lock().await += 1;
        let mut roles = self.roles.lock().await;
        let stored = roles
            .iter_mut()
            .find(|role| role.id == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role {role_id} not found")))?;
        *stored = role_from_definition(role_id, definition);
        Ok(stored.clone())
    }

    async fn delete_role(&self, _session: &AdminSession, role_id: RecordId) -> AppResult<()> {
        *self.write_calls.lock().await += 1;
        self.roles.lock().await.retain(|role| role.id != role_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeTicketRepository {
    pub comments: Mutex<Vec<(RecordId, String)>>,
    pub status_updates: Mutex<Vec<(RecordId, TicketStatus)>>,
}

#[async_trait]
impl TicketRepository for FakeTicketRepository {
    async fn list_tickets(
        &self,
        _session: &AdminSession,
        _query: TicketQuery,
    ) -> AppResult<Page<Ticket>> {
        Ok(Page {
            items: Vec::new(),
            info: None,
        })
    }

    async fn find_ticket(&self, _session: &AdminSession, ticket_id: RecordId) -> AppResult<Ticket> {
        Err(AppError::NotFound(format!("ticket {ticket_id} not found")))
    }

    async fn update_ticket_status(
        &self,
        _session: &AdminSession,
        ticket_id: RecordId,
        status: TicketStatus,
    ) -> AppResult<()> {
        self.status_updates.lock().await.push((ticket_id, status));
        Ok(())
    }

    async fn add_ticket_comment(
        &self,
        _session: &AdminSession,
        ticket_id: RecordId,
        comment: NonEmptyString,
    ) -> AppResult<()> {
        self.comments.lock().await.push((ticket_id, comment.into()));
        Ok(())
    }

    async fn ticket_stats(&self, _session: &AdminSession) -> AppResult<TicketStats> {
        Ok(TicketStats::default())
    }
}

/// Scripted gateway: each call pops the next queued outcome.
#[derive(Default)]
pub struct FakeAuthGateway {
    send_results: Mutex<Vec<AppResult<()>>>,
    verify_results: Mutex<Vec<AppResult<OtpVerification>>>,
    sent_to: Mutex<Vec<String>>,
}

impl FakeAuthGateway {
    pub fn verifying(identity: AdminIdentity) -> Self {
        Self {
            verify_results: Mutex::new(vec![Ok(OtpVerification {
                identity,
                access_token: AccessToken::new("issued-token"),
            })]),
            ..Self::default()
        }
    }

    pub fn failing_send(error: AppError) -> Self {
        Self {
            send_results: Mutex::new(vec![Err(error)]),
            ..Self::default()
        }
    }

    pub fn failing_verify(error: AppError) -> Self {
        Self {
            verify_results: Mutex::new(vec![Err(error)]),
            ..Self::default()
        }
    }

    pub async fn sent_to(&self) -> Vec<String> {
        self.sent_to.lock().await.clone()
    }
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn send_otp(&self, phone: &str) -> AppResult<()> {
        self.sent_to.lock().await.push(phone.to_owned());
        self.send_results.lock().await.pop().unwrap_or(Ok(()))
    }

    async fn verify_otp(&self, _phone: &str, _otp: &str) -> AppResult<OtpVerification> {
        self.verify_results
            .lock()
            .await
            .pop()
            .unwrap_or_else(|| Err(AppError::Unauthorized("Invalid OTP".to_owned())))
    }
}
