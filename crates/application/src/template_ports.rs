mod repository;
mod resource_query;
mod results;

pub use repository::{PermissionTemplateRepository, PermissionTemplateSummary};
pub use resource_query::{
    CandidateSet, PREVIEW_PAGE_SIZE, ResourceFilter, ResourceQuery, ResourceQueryService,
    SCOPE_PAGE_SIZE,
};
pub use results::{
    ApplyFailure, ApplyReport, PreviewResult, ResourceGrants, ResourceGrantsPage, RoleHolders,
};
