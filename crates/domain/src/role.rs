use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use rolegate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceKey;
use crate::subject::Subject;

/// Name of a role grantable globally or on a resource.
///
/// A `RoleName` is only guaranteed non-blank. Whether it is recognized for a
/// scope is decided by [`RoleCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleName(String);

impl RoleName {
    /// Global role implicitly required to administer role grants.
    pub const ADMIN: &'static str = "admin";

    /// Creates a role name, rejecting blank input with [`AppError::MissingRole`].
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::MissingRole);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the `admin` role name.
    #[must_use]
    pub fn admin() -> Self {
        Self(Self::ADMIN.to_owned())
    }

    /// Returns the role name value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Scope a role grant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleScope {
    /// Instance-wide grant, no resource attached.
    Global,
    /// Grant attached to a single resource.
    Resource,
}

impl RoleScope {
    /// Returns the scope implied by an optional resource.
    #[must_use]
    pub fn for_resource(resource: Option<&ResourceKey>) -> Self {
        match resource {
            Some(_) => Self::Resource,
            None => Self::Global,
        }
    }

    /// Returns a stable label for this scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Resource => "resource",
        }
    }
}

/// Recognized role names per scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    global_roles: BTreeSet<String>,
    resource_roles: BTreeSet<String>,
}

impl RoleCatalog {
    /// Default instance-wide roles.
    pub const DEFAULT_GLOBAL_ROLES: &'static [&'static str] = &[
        "admin",
        "profileadmin",
        "gateadmin",
        "shareDashboard",
        "scan",
        "provisioning",
    ];

    /// Default resource roles.
    pub const DEFAULT_RESOURCE_ROLES: &'static [&'static str] =
        &["user", "admin", "issueadmin", "codeviewer"];

    /// Creates a catalog from explicit role sets.
    ///
    /// The global set must contain `admin`, which guards role administration.
    pub fn new<G, R>(global_roles: G, resource_roles: R) -> AppResult<Self>
    where
        G: IntoIterator,
        G::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let global_roles = normalize_roles(global_roles);
        let resource_roles = normalize_roles(resource_roles);

        if !global_roles.contains(RoleName::ADMIN) {
            return Err(AppError::Validation(format!(
                "global role catalog must contain '{}'",
                RoleName::ADMIN
            )));
        }

        if resource_roles.is_empty() {
            return Err(AppError::Validation(
                "resource role catalog must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            global_roles,
            resource_roles,
        })
    }

    /// Returns whether the role is recognized for the scope.
    #[must_use]
    pub fn recognizes(&self, role: &RoleName, scope: RoleScope) -> bool {
        self.roles(scope).contains(role.as_str())
    }

    /// Fails unless the role is recognized for the scope.
    pub fn require(&self, role: &RoleName, scope: RoleScope) -> AppResult<()> {
        if self.recognizes(role, scope) {
            return Ok(());
        }

        Err(AppError::Validation(format!(
            "role '{role}' is not a recognized {} role",
            scope.as_str()
        )))
    }

    /// Returns recognized role names for the scope, sorted.
    #[must_use]
    pub fn roles(&self, scope: RoleScope) -> &BTreeSet<String> {
        match scope {
            RoleScope::Global => &self.global_roles,
            RoleScope::Resource => &self.resource_roles,
        }
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self {
            global_roles: normalize_roles(Self::DEFAULT_GLOBAL_ROLES.iter().copied()),
            resource_roles: normalize_roles(Self::DEFAULT_RESOURCE_ROLES.iter().copied()),
        }
    }
}

fn normalize_roles<I>(roles: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    roles
        .into_iter()
        .map(Into::into)
        .map(|role| role.trim().to_owned())
        .filter(|role| !role.is_empty())
        .collect()
}

/// One `(subject, role, resource)` triple. `resource = None` is a global grant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleGrant {
    subject: Subject,
    role: RoleName,
    resource: Option<ResourceKey>,
}

impl RoleGrant {
    /// Creates a grant triple.
    #[must_use]
    pub fn new(subject: Subject, role: RoleName, resource: Option<ResourceKey>) -> Self {
        Self {
            subject,
            role,
            resource,
        }
    }

    /// Returns the grantee.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> &RoleName {
        &self.role
    }

    /// Returns the resource, or `None` for a global grant.
    #[must_use]
    pub fn resource(&self) -> Option<&ResourceKey> {
        self.resource.as_ref()
    }
}

impl Display for RoleGrant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.resource {
            Some(resource) => write!(formatter, "{} {} on {resource}", self.subject, self.role),
            None => write!(formatter, "{} {} (global)", self.subject, self.role),
        }
    }
}
