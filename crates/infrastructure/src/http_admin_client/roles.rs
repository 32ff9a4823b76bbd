use async_trait::async_trait;
use reqwest::Method;

use warden_application::{AdminSession, Page, RoleQuery, RoleRepository};
use warden_core::{AppResult, RecordId};
use warden_domain::{Role, RoleDefinition};

use super::HttpAdminClient;

#[async_trait]
impl RoleRepository for HttpAdminClient {
    async fn list_roles(&self, session: &AdminSession, query: RoleQuery) -> AppResult<Page<Role>> {
        let status = query.status.map(|status| status.as_str());
        let url = self.listing_endpoint("roles", &query.page, status)?;
        self.send_page(self.request(Method::GET, url, Some(session)))
            .await
    }

    async fn find_role(&self, session: &AdminSession, role_id: RecordId) -> AppResult<Role> {
        let request = self.authorized(Method::GET, format!("roles/{role_id}").as_str(), session)?;
        self.send_data(request).await
    }

    async fn create_role(
        &self,
        session: &AdminSession,
        definition: RoleDefinition,
    ) -> AppResult<Role> {
        let request = self
            .authorized(Method::POST, "roles", session)?
            .json(&definition);
        self.send_data(request).await
    }

    async fn update_role(
        &self,
        session: &AdminSession,
        role_id: RecordId,
        definition: RoleDefinition,
    ) -> AppResult<Role> {
        let request = self
            .authorized(Method::PATCH, format!("roles/{role_id}").as_str(), session)?
            .json(&definition);
        self.send_data(request).await
    }

    async fn delete_role(&self, session: &AdminSession, role_id: RecordId) -> AppResult<()> {
        let request =
            self.authorized(Method::DELETE, format!("roles/{role_id}").as_str(), session)?;
        self.send_ignoring_body(request).await
    }
}
