use std::sync::Arc;

use tracing::info;
use warden_core::{AppError, AppResult, NonEmptyString, RecordId};
use warden_domain::{Ticket, TicketStats, TicketStatus};

use crate::{AdminSession, Page, TicketQuery, TicketRepository};

/// Application service for ticket triage.
#[derive(Clone)]
pub struct TicketService {
    repository: Arc<dyn TicketRepository>,
}

impl TicketService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn TicketRepository>) -> Self {
        Self { repository }
    }

    /// Returns one page of tickets.
    pub async fn list_tickets(
        &self,
        session: &AdminSession,
        query: TicketQuery,
    ) -> AppResult<Page<Ticket>> {
        self.repository.list_tickets(session, query).await
    }

    /// Returns one ticket with its comments.
    pub async fn find_ticket(&self, session: &AdminSession, ticket_id: RecordId) -> AppResult<Ticket> {
        self.repository.find_ticket(session, ticket_id).await
    }

    /// Moves a ticket to another status.
    pub async fn update_ticket_status(
        &self,
        session: &AdminSession,
        ticket_id: RecordId,
        status: TicketStatus,
    ) -> AppResult<()> {
        self.repository
            .update_ticket_status(session, ticket_id, status)
            .await?;

        info!(ticket_id = %ticket_id, status = %status, "ticket status updated");
        Ok(())
    }

    /// Appends a non-blank comment to a ticket.
    pub async fn add_ticket_comment(
        &self,
        session: &AdminSession,
        ticket_id: RecordId,
        comment: &str,
    ) -> AppResult<()> {
        let comment = NonEmptyString::new(comment.trim())
            .map_err(|_| AppError::Validation("comment must not be empty".to_owned()))?;

        self.repository
            .add_ticket_comment(session, ticket_id, comment)
            .await?;

        info!(ticket_id = %ticket_id, "ticket comment added");
        Ok(())
    }

    /// Returns aggregate ticket counters.
    pub async fn ticket_stats(&self, session: &AdminSession) -> AppResult<TicketStats> {
        self.repository.ticket_stats(session).await
    }
}
