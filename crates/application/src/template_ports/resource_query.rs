use async_trait::async_trait;
use rolegate_core::AppResult;
use rolegate_domain::{PROJECT_QUALIFIER, ResourceDescriptor};

/// Number of candidates shown by an application preview.
pub const PREVIEW_PAGE_SIZE: usize = 25;

/// Number of candidates fetched to size and run a template application.
pub const SCOPE_PAGE_SIZE: usize = 500;

/// Caller-supplied criteria selecting candidate resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Resource qualifiers; empty means projects only.
    pub qualifiers: Vec<String>,
    /// Optional name search text.
    pub names: Option<String>,
    /// Optional key search text.
    pub keys: Option<String>,
}

impl ResourceFilter {
    /// Returns trimmed, de-duplicated qualifiers, defaulting to projects.
    #[must_use]
    pub fn effective_qualifiers(&self) -> Vec<String> {
        let mut qualifiers: Vec<String> = Vec::new();
        for qualifier in &self.qualifiers {
            let qualifier = qualifier.trim();
            if !qualifier.is_empty() && !qualifiers.iter().any(|known| known == qualifier) {
                qualifiers.push(qualifier.to_owned());
            }
        }

        if qualifiers.is_empty() {
            qualifiers.push(PROJECT_QUALIFIER.to_owned());
        }

        qualifiers
    }

    /// Builds the query sent to the resource query service.
    #[must_use]
    pub fn to_query(&self, page_size: usize) -> ResourceQuery {
        ResourceQuery {
            qualifiers: self.effective_qualifiers(),
            page_size,
            names: non_blank(self.names.as_deref()),
            keys: non_blank(self.keys.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

/// One page request against the resource query service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    /// Resource qualifiers, never empty.
    pub qualifiers: Vec<String>,
    /// Maximum number of resources returned.
    pub page_size: usize,
    /// Optional name search text.
    pub names: Option<String>,
    /// Optional key search text.
    pub keys: Option<String>,
}

/// Resources returned for one query.
///
/// `total_count` is the upstream total and may exceed `resources.len()`.
/// Components without a key are dropped and left out of the total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    /// Fetched resources, in service order.
    pub resources: Vec<ResourceDescriptor>,
    /// Total number of matching resources.
    pub total_count: u64,
}

/// External resource search collaborator.
#[async_trait]
pub trait ResourceQueryService: Send + Sync {
    /// Returns one page of resources matching the query.
    async fn find(&self, query: &ResourceQuery) -> AppResult<CandidateSet>;
}
