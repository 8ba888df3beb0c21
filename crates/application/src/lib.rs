//! Application services and ports for role administration.

#![forbid(unsafe_code)]

mod authorization_service;
mod role_grant_service;
mod role_ports;
mod template_application_service;
mod template_ports;

#[cfg(test)]
mod test_fakes;

pub use authorization_service::AuthorizationService;
pub use role_grant_service::RoleGrantService;
pub use role_ports::{AuditEvent, AuditRepository, RoleStore};
pub use template_application_service::TemplateApplicationService;
pub use template_ports::{
    ApplyFailure, ApplyReport, CandidateSet, PREVIEW_PAGE_SIZE, PermissionTemplateRepository,
    PermissionTemplateSummary, PreviewResult, ResourceFilter, ResourceGrants, ResourceGrantsPage,
    ResourceQuery, ResourceQueryService, RoleHolders, SCOPE_PAGE_SIZE,
};
