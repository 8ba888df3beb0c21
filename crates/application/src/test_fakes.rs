use std::collections::{BTreeSet, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use rolegate_core::{AppError, AppResult, UserIdentity};
use rolegate_domain::{
    PermissionTemplate, ResourceDescriptor, ResourceKey, RoleGrant, RoleName, Subject,
};

use crate::{
    AuditEvent, AuditRepository, CandidateSet, PermissionTemplateRepository,
    PermissionTemplateSummary, ResourceQuery, ResourceQueryService, RoleStore,
};

#[derive(Default)]
pub(crate) struct FakeRoleStore {
    pub(crate) grants: Mutex<BTreeSet<RoleGrant>>,
    pub(crate) failing_resources: HashSet<String>,
    pub(crate) write_calls: Mutex<usize>,
}

impl FakeRoleStore {
    pub(crate) fn with_global_admin(user_id: &str) -> Self {
        let mut grants = BTreeSet::new();
        if let Ok(subject) = Subject::user(user_id) {
            grants.insert(RoleGrant::new(subject, RoleName::admin(), None));
        }

        Self {
            grants: Mutex::new(grants),
            ..Self::default()
        }
    }

    pub(crate) fn failing_on(mut self, resource_key: &str) -> Self {
        self.failing_resources.insert(resource_key.to_owned());
        self
    }

    pub(crate) async fn len(&self) -> usize {
        self.grants.lock().await.len()
    }

    fn check_failure(&self, grants: &[RoleGrant]) -> AppResult<()> {
        let failing = grants.iter().find_map(|grant| {
            grant
                .resource()
                .filter(|resource| self.failing_resources.contains(resource.as_str()))
        });

        match failing {
            Some(resource) => Err(AppError::Storage(format!(
                "write rejected for resource '{resource}'"
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RoleStore for FakeRoleStore {
    async fn grant(&self, grant: &RoleGrant) -> AppResult<()> {
        self.grant_all(std::slice::from_ref(grant)).await
    }

    async fn grant_all(&self, grants: &[RoleGrant]) -> AppResult<()> {
        *self.write_calls.lock().await += 1;
        self.check_failure(grants)?;
        self.grants.lock().await.extend(grants.iter().cloned());
        Ok(())
    }

    async fn revoke(&self, grant: &RoleGrant) -> AppResult<()> {
        self.revoke_all(std::slice::from_ref(grant)).await
    }

    async fn revoke_all(&self, grants: &[RoleGrant]) -> AppResult<()> {
        *self.write_calls.lock().await += 1;
        self.check_failure(grants)?;
        let mut stored = self.grants.lock().await;
        for grant in grants {
            stored.remove(grant);
        }
        Ok(())
    }

    async fn has_role(
        &self,
        subject: &Subject,
        role: &RoleName,
        resource: Option<&ResourceKey>,
    ) -> AppResult<bool> {
        let wanted = RoleGrant::new(subject.clone(), role.clone(), resource.cloned());
        Ok(self.grants.lock().await.contains(&wanted))
    }

    async fn list_subjects(
        &self,
        role: &RoleName,
        resource: Option<&ResourceKey>,
    ) -> AppResult<Vec<Subject>> {
        Ok(self
            .grants
            .lock()
            .await
            .iter()
            .filter(|grant| grant.role() == role && grant.resource() == resource)
            .map(|grant| grant.subject().clone())
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeTemplateRepository {
    pub(crate) templates: Vec<PermissionTemplate>,
}

#[async_trait]
impl PermissionTemplateRepository for FakeTemplateRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<PermissionTemplate>> {
        Ok(self
            .templates
            .iter()
            .find(|template| template.key() == key)
            .cloned())
    }

    async fn list_templates(&self) -> AppResult<Vec<PermissionTemplateSummary>> {
        Ok(self
            .templates
            .iter()
            .map(PermissionTemplateSummary::from)
            .collect())
    }
}

pub(crate) struct FakeResourceQueryService {
    pub(crate) resources: Vec<ResourceDescriptor>,
    pub(crate) total_count: u64,
    pub(crate) unreachable: bool,
    pub(crate) queries: Mutex<Vec<ResourceQuery>>,
}

impl FakeResourceQueryService {
    pub(crate) fn returning(keys: &[&str], total_count: u64) -> Self {
        let resources = keys
            .iter()
            .filter_map(|key| ResourceKey::new(*key).ok())
            .map(|key| {
                let name = format!("Project {key}");
                ResourceDescriptor::new(key, name, "TRK")
            })
            .collect();

        Self {
            resources,
            total_count,
            unreachable: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::returning(&[], 0)
        }
    }
}

#[async_trait]
impl ResourceQueryService for FakeResourceQueryService {
    async fn find(&self, query: &ResourceQuery) -> AppResult<CandidateSet> {
        self.queries.lock().await.push(query.clone());
        if self.unreachable {
            return Err(AppError::QueryService("connection refused".to_owned()));
        }

        Ok(CandidateSet {
            resources: self
                .resources
                .iter()
                .take(query.page_size)
                .cloned()
                .collect(),
            total_count: self.total_count,
        })
    }
}

pub(crate) fn admin() -> UserIdentity {
    UserIdentity::new("1", "Administrator")
}

pub(crate) fn resource(key: &str) -> ResourceKey {
    ResourceKey::new(key).unwrap_or_else(|error| panic!("invalid resource fixture: {error}"))
}

pub(crate) fn user(id: &str) -> Subject {
    Subject::user(id).unwrap_or_else(|error| panic!("invalid user fixture: {error}"))
}

pub(crate) fn group(id: &str) -> Subject {
    Subject::group(id).unwrap_or_else(|error| panic!("invalid group fixture: {error}"))
}

pub(crate) fn role(name: &str) -> RoleName {
    RoleName::new(name).unwrap_or_else(|error| panic!("invalid role fixture: {error}"))
}
