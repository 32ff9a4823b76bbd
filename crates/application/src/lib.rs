//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_ports;
mod forms;
mod login_flow;
mod organization_service;
mod pagination;
mod permission_ports;
mod permission_service;
mod role_ports;
mod role_service;
mod session_service;
mod ticket_ports;
mod ticket_service;

#[cfg(test)]
mod test_support;

pub use auth_ports::{
    ACCESS_TOKEN_KEY, AuthGateway, IDENTITY_KEY, ORGANIZATION_ID_KEY, OtpVerification,
    SessionStore, USER_ID_KEY,
};
pub use forms::{
    BulkPermissionForm, FormMode, InFlightSubmission, PermissionForm, RoleForm, SubmissionGuard,
};
pub use login_flow::{ACCESS_DENIED_MESSAGE, DEFAULT_ADMIN_ROLE, LoginFlow, LoginState};
pub use organization_service::{
    DIRECTORY_LISTING_LIMIT, OrganizationRepository, OrganizationService,
};
pub use pagination::{Page, PageInfo, PageQuery};
pub use permission_ports::{PERMISSION_PAGE_LIMIT, PermissionRegistry};
pub use permission_service::PermissionService;
pub use role_ports::{ROLE_PAGE_LIMIT, RoleQuery, RoleRepository};
pub use role_service::RoleService;
pub use session_service::{AdminSession, SessionService};
pub use ticket_ports::{TICKET_PAGE_LIMIT, TicketQuery, TicketRepository};
pub use ticket_service::TicketService;
