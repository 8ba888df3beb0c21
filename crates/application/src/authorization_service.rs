use std::sync::Arc;

use rolegate_core::{AppError, AppResult, UserIdentity};
use rolegate_domain::{RoleName, Subject};

use crate::RoleStore;

/// Application service guarding role administration.
#[derive(Clone)]
pub struct AuthorizationService {
    role_store: Arc<dyn RoleStore>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a role store.
    #[must_use]
    pub fn new(role_store: Arc<dyn RoleStore>) -> Self {
        Self { role_store }
    }

    /// Ensures the actor holds the global `admin` role.
    pub async fn require_admin(&self, actor: &UserIdentity) -> AppResult<()> {
        if self.is_admin(actor).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{}' is missing global role '{}'",
            actor.user_id(),
            RoleName::ADMIN
        )))
    }

    /// Returns whether the actor currently holds the global `admin` role.
    pub async fn is_admin(&self, actor: &UserIdentity) -> AppResult<bool> {
        let subject = Subject::user(actor.user_id())
            .map_err(|_| AppError::Unauthorized("actor has no user id".to_owned()))?;

        self.role_store
            .has_role(&subject, &RoleName::admin(), None)
            .await
    }
}
