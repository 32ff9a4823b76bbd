use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_core::{AppError, RecordId};

/// Workflow state of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Newly reported.
    Open,
    /// Being worked on.
    InProgress,
    /// Fixed, awaiting closure.
    Resolved,
    /// Closed.
    Closed,
}

impl TicketStatus {
    /// Returns the canonical transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

impl Display for TicketStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(AppError::Validation(format!(
                "unknown ticket status '{value}'"
            ))),
        }
    }
}

/// Urgency of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketPriority {
    /// Low urgency.
    Low,
    /// Normal urgency.
    Medium,
    /// High urgency.
    High,
    /// Needs immediate attention.
    Critical,
}

/// Person summary embedded in tickets and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier, when included.
    #[serde(default, rename = "s_no")]
    pub id: Option<RecordId>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Comment attached to a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketComment {
    /// Comment identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Comment text.
    pub comment: String,
    /// Author, when included.
    #[serde(default, rename = "users")]
    pub author: Option<UserSummary>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Support ticket raised from an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Human-facing ticket number.
    pub ticket_number: String,
    /// Short title.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form category.
    #[serde(default)]
    pub category: Option<String>,
    /// Urgency.
    pub priority: TicketPriority,
    /// Workflow state.
    pub status: TicketStatus,
    /// Owning organization.
    #[serde(default)]
    pub organization_id: Option<RecordId>,
    /// PG location within the organization.
    #[serde(default)]
    pub pg_id: Option<RecordId>,
    /// Reporter, when included.
    #[serde(default, rename = "users_issue_tickets_reported_byTousers")]
    pub reported_by: Option<UserSummary>,
    /// Comments, only present on detail responses.
    #[serde(default, rename = "issue_ticket_comments")]
    pub comments: Vec<TicketComment>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ticket counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatusCounts {
    /// Open tickets.
    #[serde(default)]
    pub open: u64,
    /// Tickets in progress.
    #[serde(default)]
    pub in_progress: u64,
    /// Resolved tickets.
    #[serde(default)]
    pub resolved: u64,
    /// Closed tickets.
    #[serde(default)]
    pub closed: u64,
}

/// Aggregate ticket counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    /// Total number of tickets.
    #[serde(default)]
    pub total: u64,
    /// Counts by status.
    #[serde(default)]
    pub by_status: TicketStatusCounts,
    /// Counts by priority value.
    #[serde(default)]
    pub by_priority: BTreeMap<String, u64>,
    /// Counts by category value.
    #[serde(default)]
    pub by_category: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Ticket, TicketPriority, TicketStats, TicketStatus};

    #[test]
    fn status_uses_screaming_snake_case() {
        let encoded = serde_json::to_string(&TicketStatus::InProgress);
        assert!(matches!(encoded.as_deref(), Ok("\"IN_PROGRESS\"")));
        assert!(matches!(
            TicketStatus::from_str("RESOLVED"),
            Ok(TicketStatus::Resolved)
        ));
        assert!(TicketStatus::from_str("done").is_err());
    }

    #[test]
    fn detail_payload_reads_reporter_and_comments() {
        let ticket = serde_json::from_str::<Ticket>(
            r#"{
                "s_no": 12,
                "ticket_number": "TKT-0012",
                "title": "Water leak",
                "priority": "HIGH",
                "status": "OPEN",
                "organization_id": 4,
                "pg_id": null,
                "created_at": "2025-03-01T10:00:00.000Z",
                "users_issue_tickets_reported_byTousers": {"name": "Ravi"},
                "issue_ticket_comments": [
                    {"s_no": 1, "comment": "Plumber booked", "users": {"name": "Admin"}}
                ]
            }"#,
        );

        assert!(ticket.is_ok_and(|ticket| {
            ticket.priority == TicketPriority::High
                && ticket.comments.len() == 1
                && ticket
                    .reported_by
                    .as_ref()
                    .and_then(|reporter| reporter.name.as_deref())
                    == Some("Ravi")
                && ticket.created_at.is_some()
        }));
    }

    #[test]
    fn stats_read_camel_case_counters() {
        let stats = serde_json::from_str::<TicketStats>(
            r#"{"total": 9, "byStatus": {"open": 4, "inProgress": 2, "resolved": 3}, "byPriority": {"HIGH": 5}}"#,
        )
        .unwrap_or_default();

        assert_eq!(stats.total, 9);
        assert_eq!(stats.by_status.in_progress, 2);
        assert_eq!(stats.by_status.closed, 0);
        assert_eq!(stats.by_priority.get("HIGH"), Some(&5));
    }
}
