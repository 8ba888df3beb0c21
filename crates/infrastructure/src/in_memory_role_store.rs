use std::collections::BTreeSet;

use async_trait::async_trait;
use rolegate_application::RoleStore;
use rolegate_core::AppResult;
use rolegate_domain::{ResourceKey, RoleGrant, RoleName, Subject};
use tokio::sync::RwLock;


/// In-memory role grant store.
///
/// Batches are applied under a single write lock, so readers never observe a
/// partially written batch.
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    grants: RwLock<BTreeSet<RoleGrant>>,
}

impl InMemoryRoleStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored grants.
    pub async fn len(&self) -> usize {
        self.grants.read().await.len()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn grant(&self, grant: &RoleGrant) -> AppResult<()> {
        self.grants.write().await.insert(grant.clone());
        Ok(())
    }

    async fn grant_all(&self, grants: &[RoleGrant]) -> AppResult<()> {
        let mut stored = self.grants.write().await;
        stored.extend(grants.iter().cloned());
        Ok(())
    }

    async fn revoke(&self, grant: &RoleGrant) -> AppResult<()> {
        self.grants.write().await.remove(grant);
        Ok(())
    }

    async fn revoke_all(&self, grants: &[RoleGrant]) -> AppResult<()> {
        let mut stored = self.grants.write().await;
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
        Ok(self.grants.read().await.contains(&wanted))
    }

    async fn list_subjects(
        &self,
        role: &RoleName,
        resource: Option<&ResourceKey>,
    ) -> AppResult<Vec<Subject>> {
        let grants = self.grants.read().await;
        let mut subjects: Vec<Subject> = grants
            .iter()
            .filter(|grant| grant.role() == role && grant.resource() == resource)
            .map(|grant| grant.subject().clone())
            .collect();
        subjects.sort();

        Ok(subjects)
    }
}
