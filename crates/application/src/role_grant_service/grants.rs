use tracing::info;

use super::*;

impl RoleGrantService {
    /// Grants a role to users, globally or on one resource.
    ///
    /// The whole batch is validated first and written in one atomic store call.
    pub async fn grant_users(
        &self,
        actor: &UserIdentity,
        user_ids: &[UserId],
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<()> {
        self.grant(actor, user_subjects(user_ids), role, resource)
            .await
    }

    /// Grants a role to groups, globally or on one resource.
    ///
    /// The `Anyone` pseudo-group is accepted like any other group.
    pub async fn grant_groups(
        &self,
        actor: &UserIdentity,
        group_ids: &[GroupId],
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<()> {
        self.grant(actor, group_subjects(group_ids), role, resource)
            .await
    }

    /// Revokes a role from users. Missing grants are ignored.
    pub async fn revoke_users(
        &self,
        actor: &UserIdentity,
        user_ids: &[UserId],
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<()> {
        self.revoke(actor, user_subjects(user_ids), role, resource)
            .await
    }

    /// Revokes a role from groups. Missing grants are ignored.
    pub async fn revoke_groups(
        &self,
        actor: &UserIdentity,
        group_ids: &[GroupId],
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<()> {
        self.revoke(actor, group_subjects(group_ids), role, resource)
            .await
    }

    /// Lists subjects currently holding a role on the scope.
    pub async fn list_subjects(
        &self,
        actor: &UserIdentity,
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<Vec<Subject>> {
        self.authorization_service.require_admin(actor).await?;
        let role = self.resolve_role(role, RoleScope::for_resource(resource))?;

        self.role_store.list_subjects(&role, resource).await
    }

    /// Lists the holders of every recognized resource role on one resource.
    ///
    /// Callers are responsible for the administrator check.
    pub(crate) async fn role_holders_on(
        &self,
        resource: &ResourceKey,
    ) -> AppResult<Vec<RoleHolders>> {
        let roles = self.role_catalog.roles(RoleScope::Resource);
        let mut holders = Vec::with_capacity(roles.len());
        for role in roles {
            let role = RoleName::new(role.as_str())?;
            let subjects = self.role_store.list_subjects(&role, Some(resource)).await?;
            holders.push(RoleHolders { role, subjects });
        }

        Ok(holders)
    }

    /// Writes every batch onto one resource in a single atomic store call.
    ///
    /// Callers are responsible for the administrator check.
    pub(crate) async fn grant_batches_on_resource(
        &self,
        batches: &[GrantBatch],
        resource: &ResourceKey,
    ) -> AppResult<usize> {
        let mut grants = Vec::new();
        for batch in batches {
            self.role_catalog.require(batch.role(), RoleScope::Resource)?;
            grants.extend(batch.grants_on(Some(resource)));
        }

        if grants.is_empty() {
            return Ok(0);
        }

        self.role_store.grant_all(&grants).await?;
        Ok(grants.len())
    }

    async fn grant(
        &self,
        actor: &UserIdentity,
        subjects: Vec<Subject>,
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<()> {
        self.authorization_service.require_admin(actor).await?;
        let (role, grants) = self.plan_grants(subjects, role, resource)?;

        self.role_store.grant_all(&grants).await?;
        info!(
            actor = actor.user_id(),
            role = role.as_str(),
            resource = resource.map(ResourceKey::as_str),
            subject_count = grants.len(),
            "role granted"
        );

        self.append_audit_event(actor, AuditAction::RoleGranted, &role, resource, &grants)
            .await
    }

    async fn revoke(
        &self,
        actor: &UserIdentity,
        subjects: Vec<Subject>,
        role: &str,
        resource: Option<&ResourceKey>,
    ) -> AppResult<()> {
        self.authorization_service.require_admin(actor).await?;
        let (role, grants) = self.plan_grants(subjects, role, resource)?;

        self.role_store.revoke_all(&grants).await?;
        info!(
            actor = actor.user_id(),
            role = role.as_str(),
            resource = resource.map(ResourceKey::as_str),
            subject_count = grants.len(),
            "role revoked"
        );

        self.append_audit_event(actor, AuditAction::RoleRevoked, &role, resource, &grants)
            .await
    }
}
