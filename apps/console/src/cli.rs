use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use warden_core::RecordId;
use warden_domain::{PermissionAction, RoleStatus, TicketStatus};

#[derive(Debug, Parser)]
#[command(
    name = "warden",
    version,
    about = "Super-admin console for permissions, roles, tickets and organizations",
    long_about = None
)]
pub struct Cli {
    #[arg(long, global = true, help = "API base URL (overrides WARDEN_API_BASE_URL)")]
    pub api_base_url: Option<String>,
    #[arg(long, global = true, help = "Session file (overrides WARDEN_SESSION_FILE)")]
    pub session_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Sign in with a one-time passcode sent to your phone")]
    Login {
        #[arg(long, help = "Phone number; prompted for when omitted")]
        phone: Option<String>,
    },
    #[command(about = "Clear the stored session")]
    Logout,
    #[command(about = "Show the signed-in administrator")]
    Whoami,
    #[command(subcommand, about = "Permission registry")]
    Permissions(PermissionCommand),
    #[command(subcommand, about = "Roles and their permission mappings")]
    Roles(RoleCommand),
    #[command(subcommand, about = "Support tickets")]
    Tickets(TicketCommand),
    #[command(subcommand, about = "Organizations and their PG locations")]
    Organizations(OrganizationCommand),
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, help = "One-based page number")]
    pub page: u32,
    #[arg(long, help = "Rows per page")]
    pub limit: Option<u32>,
    #[arg(long, help = "Free-text search")]
    pub search: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PermissionCommand {
    #[command(about = "List permissions")]
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, help = "Group the page by screen name")]
        grouped: bool,
    },
    #[command(about = "List every permission key")]
    Catalog,
    #[command(about = "Create one permission")]
    Create {
        #[arg(long)]
        screen_name: String,
        #[arg(long, help = "CREATE, VIEW, EDIT or DELETE")]
        action: PermissionAction,
        #[arg(long)]
        description: String,
    },
    #[command(about = "Create permissions from a JSON array of rows")]
    Bulk {
        #[arg(long, help = "File with [{screen_name, action, description}, ...]")]
        file: PathBuf,
    },
    #[command(about = "Replace a permission's description")]
    Update {
        id: RecordId,
        #[arg(long)]
        description: String,
    },
    #[command(about = "Delete a permission")]
    Delete { id: RecordId },
}

#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    #[command(about = "List roles")]
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, help = "ACTIVE or INACTIVE")]
        status: Option<RoleStatus>,
    },
    #[command(about = "Show one role")]
    Show {
        id: RecordId,
        #[arg(long, help = "Pair the mapping with the permission catalog")]
        catalog: bool,
    },
    #[command(about = "Create a role")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = RoleStatus::Active)]
        status: RoleStatus,
        #[arg(long = "grant", help = "Permission key to grant; repeatable")]
        grants: Vec<String>,
    },
    #[command(about = "Rename a role or change its status")]
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<RoleStatus>,
    },
    #[command(about = "Grant one permission key to a role")]
    Grant { id: RecordId, key: String },
    #[command(about = "Revoke one permission key from a role")]
    Revoke { id: RecordId, key: String },
    #[command(about = "Delete a role")]
    Delete { id: RecordId },
}

#[derive(Debug, Subcommand)]
pub enum TicketCommand {
    #[command(about = "List tickets with organization names resolved")]
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, help = "OPEN, IN_PROGRESS, RESOLVED or CLOSED")]
        status: Option<TicketStatus>,
    },
    #[command(about = "Show one ticket with its comments")]
    Show { id: RecordId },
    #[command(about = "Move a ticket to another status")]
    Status { id: RecordId, status: TicketStatus },
    #[command(about = "Add a comment to a ticket")]
    Comment { id: RecordId, text: String },
    #[command(about = "Show ticket counters")]
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum OrganizationCommand {
    #[command(about = "List organizations")]
    List,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use warden_core::RecordId;
    use warden_domain::{PermissionAction, RoleStatus};

    use super::{Cli, Command, PermissionCommand, RoleCommand};

    #[test]
    fn command_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn permission_create_parses_canonical_action() {
        let cli = Cli::try_parse_from([
            "warden",
            "permissions",
            "create",
            "--screen-name",
            "ticket",
            "--action",
            "VIEW",
            "--description",
            "view tickets",
        ]);

        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Command::Permissions(PermissionCommand::Create {
                action: PermissionAction::View,
                ..
            }))
        ));
    }

    #[test]
    fn lowercase_action_is_rejected() {
        let cli = Cli::try_parse_from([
            "warden",
            "permissions",
            "create",
            "--screen-name",
            "ticket",
            "--action",
            "view",
            "--description",
            "view tickets",
        ]);

        assert!(cli.is_err());
    }

    #[test]
    fn role_create_collects_repeated_grants() {
        let cli = Cli::try_parse_from([
            "warden",
            "--session-file",
            "/tmp/session.json",
            "roles",
            "create",
            "--name",
            "support",
            "--grant",
            "ticket_view",
            "--grant",
            "ticket_edit",
        ]);

        let Ok(cli) = cli else {
            panic!("arguments should parse");
        };
        assert!(cli.session_file.is_some());
        assert!(matches!(
            cli.command,
            Command::Roles(RoleCommand::Create { status: RoleStatus::Active, ref grants, .. })
                if grants == &["ticket_view", "ticket_edit"]
        ));
    }

    #[test]
    fn role_grant_takes_id_and_key() {
        let cli = Cli::try_parse_from(["warden", "roles", "grant", "4", "user_view"]);

        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Command::Roles(RoleCommand::Grant { id, key }))
                if id == RecordId::new(4) && key == "user_view"
        ));
    }
}
