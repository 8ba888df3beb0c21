use std::sync::Arc;

use rolegate_application::{
    AuditRepository, AuthorizationService, PermissionTemplateRepository, ResourceQueryService,
    RoleGrantService, RoleStore, TemplateApplicationService,
};
use rolegate_core::AppError;
use rolegate_infrastructure::{
    HttpResourceQueryService, PostgresAuditRepository, PostgresPermissionTemplateRepository,
    PostgresRoleStore,
};
use sqlx::PgPool;

use crate::api_config::{ApiConfig, ResourceQueryConfig};
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let role_store: Arc<dyn RoleStore> = Arc::new(PostgresRoleStore::new(pool.clone()));
    let audit_repository: Arc<dyn AuditRepository> =
        Arc::new(PostgresAuditRepository::new(pool.clone()));
    let template_repository: Arc<dyn PermissionTemplateRepository> =
        Arc::new(PostgresPermissionTemplateRepository::new(pool));
    let resource_query_service = build_resource_query_service(&config.resource_query)?;

    let authorization_service = AuthorizationService::new(role_store.clone());
    let role_grant_service = RoleGrantService::new(
        authorization_service.clone(),
        role_store,
        audit_repository.clone(),
        config.role_catalog.clone(),
    );
    let template_application_service = TemplateApplicationService::new(
        authorization_service,
        role_grant_service.clone(),
        template_repository,
        resource_query_service,
        audit_repository,
        config.bulk_policy,
    );

    Ok(AppState {
        role_grant_service,
        template_application_service,
    })
}

fn build_resource_query_service(
    config: &ResourceQueryConfig,
) -> Result<Arc<dyn ResourceQueryService>, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|error| {
            AppError::Internal(format!("failed to build resource query client: {error}"))
        })?;

    Ok(Arc::new(HttpResourceQueryService::new(
        http_client,
        config.base_url.clone(),
        config.token.clone(),
    )))
}
