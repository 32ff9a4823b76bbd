use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use warden_application::{AdminSession, Page, TicketQuery, TicketRepository};
use warden_core::{AppResult, NonEmptyString, RecordId};
use warden_domain::{Ticket, TicketStats, TicketStatus};

use super::HttpAdminClient;

#[derive(Serialize)]
struct StatusUpdate {
    status: TicketStatus,
}

#[derive(Serialize)]
struct NewComment<'a> {
    comment: &'a str,
}

#[async_trait]
impl TicketRepository for HttpAdminClient {
    async fn list_tickets(
        &self,
        session: &AdminSession,
        query: TicketQuery,
    ) -> AppResult<Page<Ticket>> {
        let status = query.status.map(|status| status.as_str());
        let url = self.listing_endpoint("tickets", &query.page, status)?;
        self.send_page(self.request(Method::GET, url, Some(session)))
            .await
    }

    async fn find_ticket(&self, session: &AdminSession, ticket_id: RecordId) -> AppResult<Ticket> {
        let request =
            self.authorized(Method::GET, format!("tickets/{ticket_id}").as_str(), session)?;
        self.send_data(request).await
    }

    async fn update_ticket_status(
        &self,
        session: &AdminSession,
        ticket_id: RecordId,
        status: TicketStatus,
    ) -> AppResult<()> {
        let request = self
            .authorized(Method::PATCH, format!("tickets/{ticket_id}").as_str(), session)?
            .json(&StatusUpdate { status });
        self.send_ignoring_body(request).await
    }

    async fn add_ticket_comment(
        &self,
        session: &AdminSession,
        ticket_id: RecordId,
        comment: NonEmptyString,
    ) -> AppResult<()> {
        let request = self
            .authorized(
                Method::POST,
                format!("tickets/{ticket_id}/comments").as_str(),
                session,
            )?
            .json(&NewComment {
                comment: comment.as_str(),
            });
        self.send_ignoring_body(request).await
    }

    async fn ticket_stats(&self, session: &AdminSession) -> AppResult<TicketStats> {
        let request = self.authorized(Method::GET, "tickets/stats", session)?;
        self.send_data(request).await
    }
}
