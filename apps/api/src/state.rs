use rolegate_application::{RoleGrantService, TemplateApplicationService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_grant_service: RoleGrantService,
    pub template_application_service: TemplateApplicationService,
}
