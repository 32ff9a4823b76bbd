mod organizations;
mod permissions;
mod roles;
mod session;
mod tickets;

use warden_application::PageQuery;
use warden_core::AppResult;

use crate::cli::{Command, ListArgs};
use crate::console_services::ConsoleServices;

pub async fn run(services: &ConsoleServices, command: Command) -> AppResult<()> {
    match command {
        Command::Login { phone } => session::login(services, phone).await,
        Command::Logout => session::logout(services).await,
        Command::Whoami => session::whoami(services).await,
        Command::Permissions(command) => permissions::run(services, command).await,
        Command::Roles(command) => roles::run(services, command).await,
        Command::Tickets(command) => tickets::run(services, command).await,
        Command::Organizations(command) => organizations::run(services, command).await,
    }
}

fn page_query(list: ListArgs, default_limit: u32) -> PageQuery {
    PageQuery::first(list.limit.unwrap_or(default_limit).max(1))
        .with_page(list.page)
        .with_search(list.search)
}
