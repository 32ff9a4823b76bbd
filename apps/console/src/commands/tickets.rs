use serde::Serialize;
use tracing::warn;
use warden_application::{Page, TICKET_PAGE_LIMIT, TicketQuery};
use warden_core::AppResult;
use warden_domain::{OrganizationDirectory, PgLocation, Ticket};

use super::page_query;
use crate::cli::TicketCommand;
use crate::console_services::ConsoleServices;
use crate::output::print_json;

/// Ticket row with organization and location resolved for display.
#[derive(Serialize)]
struct TicketRow<'a> {
    #[serde(flatten)]
    ticket: &'a Ticket,
    organization_name: &'a str,
    pg_location: Option<&'a PgLocation>,
}

pub async fn run(services: &ConsoleServices, command: TicketCommand) -> AppResult<()> {
    let session = services.require_session().await?;
    let tickets = &services.tickets;

    match command {
        TicketCommand::List { list, status } => {
            let query = TicketQuery {
                page: page_query(list, TICKET_PAGE_LIMIT),
                status,
            };
            let page = tickets.list_tickets(&session, query).await?;

            // Unresolved ids fall back to placeholder names.
            let directory = services
                .organizations
                .directory(&session)
                .await
                .unwrap_or_else(|error| {
                    warn!(error = %error, "organization directory unavailable");
                    OrganizationDirectory::default()
                });
            print_json(&resolve(&page, &directory))
        }
        TicketCommand::Show { id } => print_json(&tickets.find_ticket(&session, id).await?),
        TicketCommand::Status { id, status } => {
            tickets.update_ticket_status(&session, id, status).await?;
            eprintln!("Ticket {id} moved to {status}.");
            Ok(())
        }
        TicketCommand::Comment { id, text } => {
            tickets
                .add_ticket_comment(&session, id, text.as_str())
                .await?;
            eprintln!("Comment added to ticket {id}.");
            Ok(())
        }
        TicketCommand::Stats => print_json(&tickets.ticket_stats(&session).await?),
    }
}

fn resolve<'a>(page: &'a Page<Ticket>, directory: &'a OrganizationDirectory) -> Page<TicketRow<'a>> {
    let items = page
        .items
        .iter()
        .map(|ticket| TicketRow {
            ticket,
            organization_name: directory.organization_name(ticket.organization_id),
            pg_location: directory.pg_location(ticket.organization_id, ticket.pg_id),
        })
        .collect();

    Page {
        items,
        info: page.info,
    }
}
