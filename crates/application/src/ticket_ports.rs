use async_trait::async_trait;
use serde::Serialize;

use warden_core::{AppResult, NonEmptyString, RecordId};
use warden_domain::{Ticket, TicketStats, TicketStatus};

use crate::{AdminSession, Page, PageQuery};

/// Default page size of the ticket listing.
pub const TICKET_PAGE_LIMIT: u32 = 50;

/// Ticket listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketQuery {
    /// Page selection and search term.
    #[serde(flatten)]
    pub page: PageQuery,
    /// Only tickets in this status; `None` lists all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
}

impl Default for TicketQuery {
    fn default() -> Self {
        Self {
            page: PageQuery::first(TICKET_PAGE_LIMIT),
            status: None,
        }
    }
}

/// Port for the remote ticket endpoints.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Lists one page of tickets.
    async fn list_tickets(
        &self,
        session: &AdminSession,
        query: TicketQuery,
    ) -> AppResult<Page<Ticket>>;

    /// Fetches one ticket with its comments.
    async fn find_ticket(&self, session: &AdminSession, ticket_id: RecordId) -> AppResult<Ticket>;

    /// Moves a ticket to another status.
    async fn update_ticket_status(
        &self,
        session: &AdminSession,
        ticket_id: RecordId,
        status: TicketStatus,
    ) -> AppResult<()>;

    /// Appends a comment to a ticket.
    async fn add_ticket_comment(
        &self,
        session: &AdminSession,
        ticket_id: RecordId,
        comment: NonEmptyString,
    ) -> AppResult<()>;

    /// Returns aggregate ticket counters.
    async fn ticket_stats(&self, session: &AdminSession) -> AppResult<TicketStats>;
}
