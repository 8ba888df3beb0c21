mod audit;
mod store;

pub use audit::{AuditEvent, AuditRepository};
pub use store::RoleStore;
