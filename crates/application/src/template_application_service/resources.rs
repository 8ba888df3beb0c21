use crate::{PREVIEW_PAGE_SIZE, ResourceGrants, ResourceGrantsPage};

use super::*;

impl TemplateApplicationService {
    /// Lists the first page of matching resources with their current role holders.
    pub async fn list_resource_grants(
        &self,
        actor: &UserIdentity,
        filter: &ResourceFilter,
    ) -> AppResult<ResourceGrantsPage> {
        self.authorization_service.require_admin(actor).await?;

        let candidates = self.resolve_candidates(filter, PREVIEW_PAGE_SIZE).await?;
        let mut resources = candidates.resources;
        resources.sort_by_cached_key(|resource| resource.name.to_lowercase());

        let mut listed = Vec::with_capacity(resources.len());
        for resource in resources {
            let roles = self.role_grant_service.role_holders_on(&resource.key).await?;
            listed.push(ResourceGrants { resource, roles });
        }

        Ok(ResourceGrantsPage {
            resources: listed,
            qualifiers: filter.effective_qualifiers(),
            total_count: candidates.total_count,
        })
    }
}
