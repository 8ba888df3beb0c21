use std::sync::Arc;

use rolegate_core::{AppError, AppResult, UserIdentity};
use rolegate_domain::BulkPolicy;

use crate::{
    AuditRepository, AuthorizationService, CandidateSet, PermissionTemplateRepository,
    ResourceFilter, ResourceQueryService, RoleGrantService,
};

mod apply;
mod preview;
mod resources;


/// Application service applying permission templates to matching resources.
#[derive(Clone)]
pub struct TemplateApplicationService {
    authorization_service: AuthorizationService,
    role_grant_service: RoleGrantService,
    template_repository: Arc<dyn PermissionTemplateRepository>,
    resource_query_service: Arc<dyn ResourceQueryService>,
    audit_repository: Arc<dyn AuditRepository>,
    bulk_policy: BulkPolicy,
}

impl TemplateApplicationService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        role_grant_service: RoleGrantService,
        template_repository: Arc<dyn PermissionTemplateRepository>,
        resource_query_service: Arc<dyn ResourceQueryService>,
        audit_repository: Arc<dyn AuditRepository>,
        bulk_policy: BulkPolicy,
    ) -> Self {
        Self {
            authorization_service,
            role_grant_service,
            template_repository,
            resource_query_service,
            audit_repository,
            bulk_policy,
        }
    }

    /// Resolves candidates, keeping query failures distinct from storage failures.
    async fn resolve_candidates(
        &self,
        filter: &ResourceFilter,
        page_size: usize,
    ) -> AppResult<CandidateSet> {
        let query = filter.to_query(page_size);
        self.resource_query_service
            .find(&query)
            .await
            .map_err(|error| match error {
                AppError::QueryService(_) => error,
                other => AppError::QueryService(other.to_string()),
            })
    }
}
