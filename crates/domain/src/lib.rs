//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod organization;
mod permission;
mod role;
mod ticket;

pub use organization::{Organization, OrganizationAdmin, OrganizationDirectory, PgLocation};
pub use permission::{
    ACTION_FIELD, DESCRIPTION_FIELD, Permission, PermissionAction, PermissionCatalogEntry,
    PermissionDefinition, PermissionDraft, PermissionKey, SCREEN_NAME_FIELD, ScreenName,
    group_by_screen, validate_description,
};
pub use role::{ROLE_NAME_FIELD, Role, RoleDefinition, RoleDraft, RolePermissions, RoleStatus};
pub use ticket::{
    Ticket, TicketComment, TicketPriority, TicketStats, TicketStatus, TicketStatusCounts,
    UserSummary,
};
