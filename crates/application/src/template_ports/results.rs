use chrono::{DateTime, Utc};
use rolegate_core::ErrorKind;
use rolegate_domain::{ResourceDescriptor, ResourceKey, RoleName, Subject};
use uuid::Uuid;

use super::PermissionTemplateSummary;

/// What applying a template to the current filter would touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResult {
    /// Candidates for display, at most one preview page.
    pub resources: Vec<ResourceDescriptor>,
    /// Selectable templates, sorted by case-insensitive name.
    pub templates: Vec<PermissionTemplateSummary>,
    /// Qualifiers the candidates were resolved with.
    pub qualifiers: Vec<String>,
    /// Total matching resources reported by the query service.
    pub total_count: u64,
    /// True when no candidate matched.
    pub is_empty: bool,
    /// True when the total exceeds the bulk limit and needs confirmation.
    pub exceeds_bulk_limit: bool,
    /// Candidate name when exactly one resource matched.
    pub single_resource_name: Option<String>,
}

/// Subjects holding one resource role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHolders {
    pub role: RoleName,
    /// Users first, then groups.
    pub subjects: Vec<Subject>,
}

/// One listed resource with its current role holders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGrants {
    pub resource: ResourceDescriptor,
    /// One entry per recognized resource role, in catalog order.
    pub roles: Vec<RoleHolders>,
}

/// First page of resources matching a filter, with their role holders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGrantsPage {
    /// At most one preview page, sorted by case-insensitive name.
    pub resources: Vec<ResourceGrants>,
    pub qualifiers: Vec<String>,
    /// Total matching resources reported by the query service.
    pub total_count: u64,
}

/// Per-resource failure recorded while applying a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyFailure {
    /// Resource the grants could not be written to.
    pub resource_key: ResourceKey,
    /// Error category.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
}

/// Outcome of one template application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Stable identifier of this application run.
    pub application_id: Uuid,
    /// Applied template key.
    pub template_key: String,
    /// Total matching resources reported by the query service.
    pub total_count: u64,
    /// Resources whose grants were all written.
    pub success_count: usize,
    /// Resources left untouched because their grants failed.
    pub failures: Vec<ApplyFailure>,
    /// Completion timestamp.
    pub applied_at: DateTime<Utc>,
}

impl ApplyReport {
    /// Returns the number of resources processed.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.success_count + self.failures.len()
    }
}
