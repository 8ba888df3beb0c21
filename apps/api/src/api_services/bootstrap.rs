use rolegate_application::RoleStore;
use rolegate_core::AppError;
use rolegate_domain::{RoleGrant, RoleName, Subject, UserId};
use tracing::info;

/// Grants the global `admin` role to the configured bootstrap user.
///
/// Runs outside the administrator check, which an empty store cannot pass.
pub async fn bootstrap_admin(role_store: &dyn RoleStore, user_id: &UserId) -> Result<(), AppError> {
    let grant = RoleGrant::new(Subject::User(user_id.clone()), RoleName::admin(), None);
    role_store.grant(&grant).await?;

    info!(user_id = user_id.as_str(), "bootstrap administrator ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rolegate_application::RoleStore;
    use rolegate_domain::{RoleName, Subject, UserId};
    use rolegate_infrastructure::InMemoryRoleStore;

    use super::bootstrap_admin;

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let store = InMemoryRoleStore::new();
        let user_id = UserId::new("1").unwrap_or_else(|error| panic!("{error}"));

        assert!(bootstrap_admin(&store, &user_id).await.is_ok());
        assert!(bootstrap_admin(&store, &user_id).await.is_ok());

        assert_eq!(store.len().await, 1);
        let is_admin = store
            .has_role(&Subject::User(user_id), &RoleName::admin(), None)
            .await;
        assert!(matches!(is_admin, Ok(true)));
    }
}
