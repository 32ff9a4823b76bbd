use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use warden_application::{AdminSession, Page, PageQuery, PermissionRegistry};
use warden_core::{AppResult, NonEmptyString, RecordId};
use warden_domain::{Permission, PermissionCatalogEntry, PermissionDefinition};

use super::HttpAdminClient;

#[derive(Serialize)]
struct DescriptionUpdate<'a> {
    description: &'a str,
}

// The bulk endpoint does not always echo the created rows.
#[derive(Deserialize)]
struct BulkCreated {
    #[serde(default)]
    data: Option<Vec<Permission>>,
}

#[async_trait]
impl PermissionRegistry for HttpAdminClient {
    async fn list_permissions(
        &self,
        session: &AdminSession,
        query: PageQuery,
    ) -> AppResult<Page<Permission>> {
        let url = self.listing_endpoint("permissions", &query, None)?;
        self.send_page(self.request(Method::GET, url, Some(session)))
            .await
    }

    async fn list_permission_catalog(
        &self,
        session: &AdminSession,
    ) -> AppResult<Vec<PermissionCatalogEntry>> {
        let request = self.authorized(Method::GET, "permissions/simple", session)?;
        self.send_data(request).await
    }

    async fn create_permission(
        &self,
        session: &AdminSession,
        definition: PermissionDefinition,
    ) -> AppResult<Permission> {
        let request = self
            .authorized(Method::POST, "permissions", session)?
            .json(&definition);
        self.send_data(request).await
    }

    async fn create_permissions(
        &self,
        session: &AdminSession,
        definitions: Vec<PermissionDefinition>,
    ) -> AppResult<Vec<Permission>> {
        let request = self
            .authorized(Method::POST, "permissions/bulk", session)?
            .json(&definitions);
        let created: BulkCreated = self.send_json(request).await?;
        Ok(created.data.unwrap_or_default())
    }

    async fn update_permission_description(
        &self,
        session: &AdminSession,
        permission_id: RecordId,
        description: NonEmptyString,
    ) -> AppResult<Permission> {
        let request = self
            .authorized(
                Method::PATCH,
                format!("permissions/{permission_id}").as_str(),
                session,
            )?
            .json(&DescriptionUpdate {
                description: description.as_str(),
            });
        self.send_data(request).await
    }

    async fn delete_permission(
        &self,
        session: &AdminSession,
        permission_id: RecordId,
    ) -> AppResult<()> {
        let request = self.authorized(
            Method::DELETE,
            format!("permissions/{permission_id}").as_str(),
            session,
        )?;
        self.send_ignoring_body(request).await
    }
}
