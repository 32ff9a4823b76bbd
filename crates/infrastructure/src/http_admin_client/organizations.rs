use async_trait::async_trait;
use reqwest::Method;

use warden_application::{AdminSession, OrganizationRepository};
use warden_core::AppResult;
use warden_domain::Organization;

use super::HttpAdminClient;

#[async_trait]
impl OrganizationRepository for HttpAdminClient {
    async fn list_organizations(
        &self,
        session: &AdminSession,
        limit: Option<u32>,
    ) -> AppResult<Vec<Organization>> {
        let mut url = self.endpoint("organizations")?;
        if let Some(limit) = limit {
            url.query_pairs_mut()
                .append_pair("limit", limit.to_string().as_str());
        }

        self.send_data(self.request(Method::GET, url, Some(session)))
            .await
    }
}
