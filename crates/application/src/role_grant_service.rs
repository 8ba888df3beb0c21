use std::sync::Arc;

use rolegate_core::{AppError, AppResult, UserIdentity};
use rolegate_domain::{
    AuditAction, GrantBatch, GroupId, ResourceKey, RoleCatalog, RoleGrant, RoleName, RoleScope,
    Subject, UserId,
};

use crate::{AuditEvent, AuditRepository, AuthorizationService, RoleHolders, RoleStore};

mod grants;


/// Application service granting and revoking roles for users and groups.
#[derive(Clone)]
pub struct RoleGrantService {
    authorization_service: AuthorizationService,
    role_store: Arc<dyn RoleStore>,
    audit_repository: Arc<dyn AuditRepository>,
    role_catalog: Arc<RoleCatalog>,
}

impl RoleGrantService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        role_store: Arc<dyn RoleStore>,
        audit_repository: Arc<dyn AuditRepository>,
        role_catalog: RoleCatalog,
    ) -> Self {
        Self {
            authorization_service,
            role_store,
            audit_repository,
            role_catalog: Arc::new(role_catalog),
        }
    }

    /// Returns the catalog used to validate role names.
    #[must_use]
    pub fn role_catalog(&self) -> &RoleCatalog {
        &self.role_catalog
    }

    fn resolve_role(&self, role: &str, scope: RoleScope) -> AppResult<RoleName> {
        let role = RoleName::new(role)?;
        self.role_catalog.require(&role, scope)?;
        Ok(role)
    }

    /// Validates a whole request and expands it into grant triples.
    fn plan_grants(
        &self,
        subjects: Vec<Subject>,
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<(RoleName, Vec<RoleGrant>)> {
        let role = self.resolve_role(role, RoleScope::for_resource(resource))?;

        if subjects.is_empty() {
            return Err(AppError::Validation(
                "at least one user or group is required".to_owned(),
            ));
        }

        let mut grants: Vec<RoleGrant> = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let grant = RoleGrant::new(subject, role.clone(), resource.cloned());
            if !grants.contains(&grant) {
                grants.push(grant);
            }
        }

        Ok((role, grants))
    }

    async fn append_audit_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        role: &RoleName,
        resource: Option<&ResourceKey>,
        subjects: &[RoleGrant],
    ) -> AppResult<()> {
        let scope = resource.map_or_else(|| "global".to_owned(), ToString::to_string);
        let subject_list = subjects
            .iter()
            .map(|grant| grant.subject().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let verb = match action {
            AuditAction::RoleRevoked => "revoked",
            _ => "granted",
        };

        self.audit_repository
            .append_event(AuditEvent {
                actor: actor.user_id().to_owned(),
                action,
                resource_type: "role_grant".to_owned(),
                resource_id: format!("{role}@{scope}"),
                detail: Some(format!("{verb} role '{role}' on {scope} for {subject_list}")),
            })
            .await
    }
}

fn user_subjects(user_ids: &[UserId]) -> Vec<Subject> {
    user_ids.iter().cloned().map(Subject::User).collect()
}

fn group_subjects(group_ids: &[GroupId]) -> Vec<Subject> {
    group_ids.iter().cloned().map(Subject::Group).collect()
}
