use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use rolegate_application::RoleStore;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{ResourceKey, RoleGrant, RoleName, Subject, SubjectKind};


/// PostgreSQL-backed role grant store.
#[derive(Clone)]
pub struct PostgresRoleStore {
    pool: PgPool,
}

impl PostgresRoleStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|error| AppError::Storage(format!("failed to begin transaction: {error}")))
    }
}

#[derive(Debug, FromRow)]
struct SubjectRow {
    subject_kind: String,
    subject_id: String,
}

impl TryFrom<SubjectRow> for Subject {
    type Error = AppError;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        let kind = SubjectKind::from_str(row.subject_kind.as_str()).map_err(|error| {
            AppError::Storage(format!("invalid persisted subject kind: {error}"))
        })?;

        Subject::from_parts(kind, row.subject_id.as_str())
            .map_err(|error| AppError::Storage(format!("invalid persisted subject: {error}")))
    }
}

async fn insert_grant(
    transaction: &mut Transaction<'_, Postgres>,
    grant: &RoleGrant,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO role_grants (subject_kind, subject_id, role, resource_key)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(grant.subject().kind().as_str())
    .bind(grant.subject().id())
    .bind(grant.role().as_str())
    .bind(grant.resource().map(ResourceKey::as_str))
    .execute(&mut **transaction)
    .await
    .map_err(|error| AppError::Storage(format!("failed to grant {grant}: {error}")))?;

    Ok(())
}

async fn delete_grant(
    transaction: &mut Transaction<'_, Postgres>,
    grant: &RoleGrant,
) -> AppResult<()> {
    sqlx::query(
        r#"
        DELETE FROM role_grants
        WHERE subject_kind = $1
            AND subject_id = $2
            AND role = $3
            AND resource_key IS NOT DISTINCT FROM $4
        "#,
    )
    .bind(grant.subject().kind().as_str())
    .bind(grant.subject().id())
    .bind(grant.role().as_str())
    .bind(grant.resource().map(ResourceKey::as_str))
    .execute(&mut **transaction)
    .await
    .map_err(|error| AppError::Storage(format!("failed to revoke {grant}: {error}")))?;

    Ok(())
}

#[async_trait]
impl RoleStore for PostgresRoleStore {
    async fn grant(&self, grant: &RoleGrant) -> AppResult<()> {
        self.grant_all(std::slice::from_ref(grant)).await
    }

    async fn grant_all(&self, grants: &[RoleGrant]) -> AppResult<()> {
        let mut transaction = self.begin().await?;
        for grant in grants {
            insert_grant(&mut transaction, grant).await?;
        }

        transaction
            .commit()
            .await
            .map_err(|error| AppError::Storage(format!("failed to commit transaction: {error}")))
    }

    async fn revoke(&self, grant: &RoleGrant) -> AppResult<()> {
        self.revoke_all(std::slice::from_ref(grant)).await
    }

    async fn revoke_all(&self, grants: &[RoleGrant]) -> AppResult<()> {
        let mut transaction = self.begin().await?;
        for grant in grants {
            delete_grant(&mut transaction, grant).await?;
        }

        transaction
            .commit()
            .await
            .map_err(|error| AppError::Storage(format!("failed to commit transaction: {error}")))
    }

    async fn has_role(
        &self,
        subject: &Subject,
        role: &RoleName,
        resource: Option<&ResourceKey>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM role_grants
                WHERE subject_kind = $1
                    AND subject_id = $2
                    AND role = $3
                    AND resource_key IS NOT DISTINCT FROM $4
            )
            "#,
        )
        .bind(subject.kind().as_str())
        .bind(subject.id())
        .bind(role.as_str())
        .bind(resource.map(ResourceKey::as_str))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to check role grant: {error}")))
    }

    async fn list_subjects(
        &self,
        role: &RoleName,
        resource: Option<&ResourceKey>,
    ) -> AppResult<Vec<Subject>> {
        let rows = sqlx::query_as::<_, SubjectRow>(
            r#"
            SELECT subject_kind, subject_id
            FROM role_grants
            WHERE role = $1
                AND resource_key IS NOT DISTINCT FROM $2
            ORDER BY
                CASE subject_kind WHEN 'user' THEN 0 ELSE 1 END,
                subject_id
            "#,
        )
        .bind(role.as_str())
        .bind(resource.map(ResourceKey::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to list role grants: {error}")))?;

        rows.into_iter().map(Subject::try_from).collect()
    }
}
