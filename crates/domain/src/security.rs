use std::str::FromStr;

use rolegate_core::AppError;
use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by role administration use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role is granted to one or more subjects.
    RoleGranted,
    /// Emitted when a role is revoked from one or more subjects.
    RoleRevoked,
    /// Emitted when a permission template is applied to candidate resources.
    TemplateApplied,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleGranted => "role.granted",
            Self::RoleRevoked => "role.revoked",
            Self::TemplateApplied => "template.applied",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "role.granted" => Ok(Self::RoleGranted),
            "role.revoked" => Ok(Self::RoleRevoked),
            "template.applied" => Ok(Self::TemplateApplied),
            _ => Err(AppError::Validation(format!(
                "unknown audit action value '{value}'"
            ))),
        }
    }
}
