use warden_core::AppResult;

use crate::cli::OrganizationCommand;
use crate::console_services::ConsoleServices;
use crate::output::print_json;

pub async fn run(services: &ConsoleServices, command: OrganizationCommand) -> AppResult<()> {
    let session = services.require_session().await?;

    match command {
        OrganizationCommand::List => {
            print_json(&services.organizations.list_organizations(&session).await?)
        }
    }
}
