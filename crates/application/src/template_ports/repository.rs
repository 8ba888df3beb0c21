use async_trait::async_trait;
use rolegate_core::AppResult;
use rolegate_domain::PermissionTemplate;

/// Template projection used by selection lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTemplateSummary {
    /// Unique template key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl From<&PermissionTemplate> for PermissionTemplateSummary {
    fn from(value: &PermissionTemplate) -> Self {
        Self {
            key: value.key().to_owned(),
            name: value.name().to_owned(),
            description: value.description().map(ToOwned::to_owned),
        }
    }
}

/// Read-only access to permission templates maintained elsewhere.
#[async_trait]
pub trait PermissionTemplateRepository: Send + Sync {
    /// Loads one template snapshot by key.
    async fn find_by_key(&self, key: &str) -> AppResult<Option<PermissionTemplate>>;

    /// Lists every template, in no particular order.
    async fn list_templates(&self) -> AppResult<Vec<PermissionTemplateSummary>>;
}
