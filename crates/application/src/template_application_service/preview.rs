use crate::{PREVIEW_PAGE_SIZE, PreviewResult, SCOPE_PAGE_SIZE};

use super::*;

impl TemplateApplicationService {
    /// Describes what applying a template to the filter would touch.
    ///
    /// `exceeds_bulk_limit` tells the caller to ask for a separate
    /// confirmation before calling [`Self::apply_template`].
    pub async fn preview_application(
        &self,
        actor: &UserIdentity,
        filter: &ResourceFilter,
    ) -> AppResult<PreviewResult> {
        self.authorization_service.require_admin(actor).await?;

        let candidates = self.resolve_candidates(filter, SCOPE_PAGE_SIZE).await?;

        let mut templates = self.template_repository.list_templates().await?;
        templates.sort_by_cached_key(|template| template.name.to_lowercase());

        let single_resource_name = match candidates.resources.as_slice() {
            [only] => Some(only.name.clone()),
            _ => None,
        };
        let is_empty = candidates.resources.is_empty();
        let exceeds_bulk_limit = self.bulk_policy.exceeds_limit(candidates.total_count);

        let mut resources = candidates.resources;
        resources.truncate(PREVIEW_PAGE_SIZE);

        Ok(PreviewResult {
            resources,
            templates,
            qualifiers: filter.effective_qualifiers(),
            total_count: candidates.total_count,
            is_empty,
            exceeds_bulk_limit,
            single_resource_name,
        })
    }
}
