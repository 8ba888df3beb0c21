use rolegate_application::{ResourceGrants, ResourceGrantsPage, RoleHolders};
use rolegate_domain::Subject;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ResourceResponse;

/// Incoming payload granting or revoking a role for users.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user-grant-request.ts")]
pub struct UserGrantRequest {
    pub user_ids: Vec<String>,
    pub role: String,
    #[serde(default)]
    pub resource: Option<String>,
}

/// Incoming payload granting or revoking a role for groups.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "group-grant-request.ts")]
pub struct GroupGrantRequest {
    pub group_ids: Vec<String>,
    pub role: String,
    #[serde(default)]
    pub resource: Option<String>,
}

/// API representation of a role holder.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject-response.ts")]
pub struct SubjectResponse {
    pub kind: String,
    pub id: String,
}

impl From<Subject> for SubjectResponse {
    fn from(value: Subject) -> Self {
        Self {
            kind: value.kind().as_str().to_owned(),
            id: value.id().to_owned(),
        }
    }
}

/// Subjects holding one role on a listed resource.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "role-holders-response.ts")]
pub struct RoleHoldersResponse {
    pub role: String,
    pub subjects: Vec<SubjectResponse>,
}

impl From<RoleHolders> for RoleHoldersResponse {
    fn from(value: RoleHolders) -> Self {
        Self {
            role: value.role.as_str().to_owned(),
            subjects: value.subjects.into_iter().map(SubjectResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "resource-grants-response.ts")]
pub struct ResourceGrantsResponse {
    pub resource: ResourceResponse,
    pub roles: Vec<RoleHoldersResponse>,
}

impl From<ResourceGrants> for ResourceGrantsResponse {
    fn from(value: ResourceGrants) -> Self {
        Self {
            resource: ResourceResponse::from(value.resource),
            roles: value.roles.into_iter().map(RoleHoldersResponse::from).collect(),
        }
    }
}

/// API representation of the resource role listing.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "resource-grants-page-response.ts")]
pub struct ResourceGrantsPageResponse {
    pub resources: Vec<ResourceGrantsResponse>,
    pub qualifiers: Vec<String>,
    #[ts(type = "number")]
    pub total_count: u64,
}

impl From<ResourceGrantsPage> for ResourceGrantsPageResponse {
    fn from(value: ResourceGrantsPage) -> Self {
        Self {
            resources: value
                .resources
                .into_iter()
                .map(ResourceGrantsResponse::from)
                .collect(),
            qualifiers: value.qualifiers,
            total_count: value.total_count,
        }
    }
}
