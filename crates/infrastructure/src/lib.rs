//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_resource_query_service;
mod in_memory_permission_template_repository;
mod in_memory_resource_query_service;
mod in_memory_role_store;
mod postgres_audit_repository;
mod postgres_permission_template_repository;
mod postgres_role_store;

pub use http_resource_query_service::HttpResourceQueryService;
pub use in_memory_permission_template_repository::InMemoryPermissionTemplateRepository;
pub use in_memory_resource_query_service::InMemoryResourceQueryService;
pub use in_memory_role_store::InMemoryRoleStore;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_permission_template_repository::PostgresPermissionTemplateRepository;
pub use postgres_role_store::PostgresRoleStore;
