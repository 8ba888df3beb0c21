use async_trait::async_trait;
use rolegate_application::{CandidateSet, ResourceQuery, ResourceQueryService};
use rolegate_core::AppResult;
use rolegate_domain::ResourceDescriptor;
use tokio::sync::RwLock;

/// In-memory resource catalog answering resource queries.
///
/// Names match case-insensitively on substrings, keys on substrings. Results
/// keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryResourceQueryService {
    resources: RwLock<Vec<ResourceDescriptor>>,
}

impl InMemoryResourceQueryService {
    /// Creates a catalog seeded with the provided resources.
    #[must_use]
    pub fn with_resources(resources: impl IntoIterator<Item = ResourceDescriptor>) -> Self {
        Self {
            resources: RwLock::new(resources.into_iter().collect()),
        }
    }

    /// Adds one resource to the catalog.
    pub async fn add_resource(&self, resource: ResourceDescriptor) {
        self.resources.write().await.push(resource);
    }
}

fn matches_query(resource: &ResourceDescriptor, query: &ResourceQuery) -> bool {
    if !query
        .qualifiers
        .iter()
        .any(|qualifier| qualifier == &resource.qualifier)
    {
        return false;
    }

    let name_matches = query.names.as_deref().is_none_or(|names| {
        resource
            .name
            .to_lowercase()
            .contains(names.to_lowercase().as_str())
    });
    let key_matches = query
        .keys
        .as_deref()
        .is_none_or(|keys| resource.key.as_str().contains(keys));

    name_matches && key_matches
}

#[async_trait]
impl ResourceQueryService for InMemoryResourceQueryService {
    async fn find(&self, query: &ResourceQuery) -> AppResult<CandidateSet> {
        let resources = self.resources.read().await;
        let matching: Vec<&ResourceDescriptor> = resources
            .iter()
            .filter(|resource| matches_query(resource, query))
            .collect();

        Ok(CandidateSet {
            total_count: matching.len() as u64,
            resources: matching
                .into_iter()
                .take(query.page_size)
                .cloned()
                .collect(),
        })
    }
}
