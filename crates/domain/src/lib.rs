//! Domain entities and invariants for resource-scoped role administration.

#![forbid(unsafe_code)]

mod bulk_policy;
mod resource;
mod role;
mod security;
mod subject;
mod template;

pub use bulk_policy::BulkPolicy;
pub use resource::{PROJECT_QUALIFIER, ResourceDescriptor, ResourceKey};
pub use role::{RoleCatalog, RoleGrant, RoleName, RoleScope};
pub use security::AuditAction;
pub use subject::{GroupId, Subject, SubjectKind, UserId};
pub use template::{GrantBatch, PermissionTemplate, TemplateEntry};
