use async_trait::async_trait;
use rolegate_core::AppResult;
use rolegate_domain::{ResourceKey, RoleGrant, RoleName, Subject};

/// Persistent set of `(subject, role, resource)` grants.
///
/// Every write is idempotent: granting an existing triple and revoking a
/// missing one both succeed without changing the store. Failures surface as
/// `AppError::Storage`.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Inserts the triple if absent.
    async fn grant(&self, grant: &RoleGrant) -> AppResult<()>;

    /// Inserts every triple, all or nothing.
    async fn grant_all(&self, grants: &[RoleGrant]) -> AppResult<()>;

    /// Removes the triple if present.
    async fn revoke(&self, grant: &RoleGrant) -> AppResult<()>;

    /// Removes every triple, all or nothing.
    async fn revoke_all(&self, grants: &[RoleGrant]) -> AppResult<()>;

    /// Returns whether the exact triple exists.
    async fn has_role(
        &self,
        subject: &Subject,
        role: &RoleName,
        resource: Option<&ResourceKey>,
    ) -> AppResult<bool>;

    /// Lists subjects holding the role on exactly this scope, users first.
    async fn list_subjects(
        &self,
        role: &RoleName,
        resource: Option<&ResourceKey>,
    ) -> AppResult<Vec<Subject>>;
}
