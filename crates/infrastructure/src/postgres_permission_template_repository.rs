use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use rolegate_application::{PermissionTemplateRepository, PermissionTemplateSummary};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{PermissionTemplate, RoleName, Subject, SubjectKind, TemplateEntry};


/// PostgreSQL-backed read-only permission template repository.
#[derive(Clone)]
pub struct PostgresPermissionTemplateRepository {
    pool: PgPool,
}

impl PostgresPermissionTemplateRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TemplateRow {
    key: String,
    name: String,
    description: Option<String>,
}

#[derive(Debug, FromRow)]
struct TemplateEntryRow {
    role: String,
    subject_kind: String,
    subject_id: String,
}

impl TryFrom<TemplateEntryRow> for TemplateEntry {
    type Error = AppError;

    fn try_from(row: TemplateEntryRow) -> Result<Self, Self::Error> {
        let role = RoleName::new(row.role)
            .map_err(|error| AppError::Storage(format!("invalid persisted template role: {error}")))?;
        let kind = SubjectKind::from_str(row.subject_kind.as_str()).map_err(|error| {
            AppError::Storage(format!("invalid persisted template subject kind: {error}"))
        })?;
        let subject = Subject::from_parts(kind, row.subject_id.as_str()).map_err(|error| {
            AppError::Storage(format!("invalid persisted template subject: {error}"))
        })?;

        Ok(TemplateEntry::new(role, [subject]))
    }
}

#[async_trait]
impl PermissionTemplateRepository for PostgresPermissionTemplateRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<PermissionTemplate>> {
        let template = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT key, name, description
            FROM permission_templates
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to find permission template '{key}': {error}"))
        })?;

        let Some(template) = template else {
            return Ok(None);
        };

        let entries = sqlx::query_as::<_, TemplateEntryRow>(
            r#"
            SELECT role, subject_kind, subject_id
            FROM permission_template_entries
            WHERE template_key = $1
            ORDER BY position, role, subject_kind DESC, subject_id
            "#,
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to load entries for permission template '{key}': {error}"
            ))
        })?
        .into_iter()
        .map(TemplateEntry::try_from)
        .collect::<AppResult<Vec<_>>>()?;

        PermissionTemplate::new(template.key, template.name, template.description, entries)
            .map(Some)
            .map_err(|error| {
                AppError::Storage(format!("invalid persisted permission template '{key}': {error}"))
            })
    }

    async fn list_templates(&self) -> AppResult<Vec<PermissionTemplateSummary>> {
        let rows = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT key, name, description
            FROM permission_templates
            ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to list permission templates: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| PermissionTemplateSummary {
                key: row.key,
                name: row.name,
                description: row.description,
            })
            .collect())
    }
}
