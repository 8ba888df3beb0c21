use std::fmt::{Display, Formatter};

use rolegate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Qualifier of project resources, the default application target.
pub const PROJECT_QUALIFIER: &str = "TRK";

/// Unique key of a permission-bearing resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Creates a validated resource key.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(|value| Self(value.into()))
            .map_err(|_| AppError::Validation("resource key must not be blank".to_owned()))
    }

    /// Returns the key value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ResourceKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Resource as described by the resource query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Unique resource key.
    pub key: ResourceKey,
    /// Display name.
    pub name: String,
    /// Resource type qualifier, e.g. `TRK` for projects.
    pub qualifier: String,
}

impl ResourceDescriptor {
    /// Creates a resource descriptor.
    #[must_use]
    pub fn new(key: ResourceKey, name: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            qualifier: qualifier.into(),
        }
    }
}
