use std::sync::Arc;

use async_trait::async_trait;
use rolegate_application::{
    AuditEvent, AuditRepository, AuthorizationService, RoleGrantService, RoleStore,
    TemplateApplicationService,
};
use rolegate_core::{AppResult, UserIdentity};
use rolegate_domain::{
    BulkPolicy, PermissionTemplate, ResourceDescriptor, ResourceKey, RoleCatalog, RoleGrant,
    RoleName, Subject,
};
use rolegate_infrastructure::{
    InMemoryPermissionTemplateRepository, InMemoryResourceQueryService, InMemoryRoleStore,
};

use crate::state::AppState;

pub(crate) struct NoopAuditRepository;

#[async_trait]
impl AuditRepository for NoopAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Ok(())
    }
}

pub(crate) struct TestApp {
    pub state: AppState,
    pub role_store: Arc<InMemoryRoleStore>,
}

pub(crate) async fn test_app(
    templates: Vec<PermissionTemplate>,
    resources: Vec<ResourceDescriptor>,
) -> TestApp {
    let role_store = Arc::new(InMemoryRoleStore::new());
    let admin_grant = RoleGrant::new(subject("1"), RoleName::admin(), None);
    assert!(role_store.grant(&admin_grant).await.is_ok());

    let audit_repository = Arc::new(NoopAuditRepository);
    let authorization_service = AuthorizationService::new(role_store.clone());
    let role_grant_service = RoleGrantService::new(
        authorization_service.clone(),
        role_store.clone(),
        audit_repository.clone(),
        RoleCatalog::default(),
    );
    let template_application_service = TemplateApplicationService::new(
        authorization_service,
        role_grant_service.clone(),
        Arc::new(InMemoryPermissionTemplateRepository::with_templates(
            templates,
        )),
        Arc::new(InMemoryResourceQueryService::with_resources(resources)),
        audit_repository,
        BulkPolicy::default(),
    );

    TestApp {
        state: AppState {
            role_grant_service,
            template_application_service,
        },
        role_store,
    }
}

pub(crate) fn admin() -> UserIdentity {
    UserIdentity::new("1", "Administrator")
}

pub(crate) fn subject(user_id: &str) -> Subject {
    Subject::user(user_id).unwrap_or_else(|error| panic!("invalid user fixture: {error}"))
}

pub(crate) fn resource(key: &str) -> ResourceKey {
    ResourceKey::new(key).unwrap_or_else(|error| panic!("invalid resource fixture: {error}"))
}

pub(crate) fn project(key: &str, name: &str) -> ResourceDescriptor {
    ResourceDescriptor::new(resource(key), name, "TRK")
}
