use std::collections::HashMap;

use async_trait::async_trait;
use rolegate_application::{PermissionTemplateRepository, PermissionTemplateSummary};
use rolegate_core::AppResult;
use rolegate_domain::PermissionTemplate;
use tokio::sync::RwLock;

/// In-memory permission template repository.
#[derive(Debug, Default)]
pub struct InMemoryPermissionTemplateRepository {
    templates: RwLock<HashMap<String, PermissionTemplate>>,
}

impl InMemoryPermissionTemplateRepository {
    /// Creates a repository seeded with the provided templates.
    #[must_use]
    pub fn with_templates(templates: impl IntoIterator<Item = PermissionTemplate>) -> Self {
        Self {
            templates: RwLock::new(
                templates
                    .into_iter()
                    .map(|template| (template.key().to_owned(), template))
                    .collect(),
            ),
        }
    }

    /// Stores a template, replacing any template with the same key.
    pub async fn save_template(&self, template: PermissionTemplate) {
        self.templates
            .write()
            .await
            .insert(template.key().to_owned(), template);
    }
}

#[async_trait]
impl PermissionTemplateRepository for InMemoryPermissionTemplateRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<PermissionTemplate>> {
        Ok(self.templates.read().await.get(key).cloned())
    }

    async fn list_templates(&self) -> AppResult<Vec<PermissionTemplateSummary>> {
        Ok(self
            .templates
            .read()
            .await
            .values()
            .map(PermissionTemplateSummary::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rolegate_application::PermissionTemplateRepository;
    use rolegate_domain::{PermissionTemplate, RoleName, Subject, TemplateEntry};

    use super::InMemoryPermissionTemplateRepository;

    fn template(key: &str, user_id: &str) -> PermissionTemplate {
        let role = RoleName::new("user").unwrap_or_else(|error| panic!("invalid role: {error}"));
        let subject =
            Subject::user(user_id).unwrap_or_else(|error| panic!("invalid subject: {error}"));
        PermissionTemplate::new(key, key, None, vec![TemplateEntry::new(role, [subject])])
            .unwrap_or_else(|error| panic!("invalid template: {error}"))
    }

    #[tokio::test]
    async fn saving_replaces_template_with_same_key() {
        let repository = InMemoryPermissionTemplateRepository::with_templates([template("default", "1")]);
        repository.save_template(template("default", "2")).await;

        let found = repository.find_by_key("default").await;
        let listed = repository.list_templates().await;

        assert!(matches!(found, Ok(Some(ref template))
            if template.entries()[0].subjects()[0].id() == "2"));
        assert!(matches!(listed, Ok(ref summaries) if summaries.len() == 1));
    }

    #[tokio::test]
    async fn unknown_key_is_none() {
        let repository = InMemoryPermissionTemplateRepository::default();

        let found = repository.find_by_key("missing").await;

        assert!(matches!(found, Ok(None)));
    }
}
