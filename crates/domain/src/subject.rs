use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rolegate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a user in the identity store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(|value| Self(value.into()))
            .map_err(|_| AppError::Validation("user id must not be blank".to_owned()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Opaque identifier of a group in the identity store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    /// Identifier of the pseudo-group matching every caller, authenticated or not.
    pub const ANYONE: &'static str = "Anyone";

    /// Creates a validated group identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(|value| Self(value.into()))
            .map_err(|_| AppError::Validation("group id must not be blank".to_owned()))
    }

    /// Returns the `Anyone` pseudo-group.
    #[must_use]
    pub fn anyone() -> Self {
        Self(Self::ANYONE.to_owned())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for GroupId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Grantee of a role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
    /// A single user.
    User(UserId),
    /// A group of users.
    Group(GroupId),
}

impl Subject {
    /// Builds a user subject from a raw identifier.
    pub fn user(value: impl Into<String>) -> AppResult<Self> {
        UserId::new(value).map(Self::User)
    }

    /// Builds a group subject from a raw identifier.
    pub fn group(value: impl Into<String>) -> AppResult<Self> {
        GroupId::new(value).map(Self::Group)
    }

    /// Rebuilds a subject from its persisted kind and identifier.
    pub fn from_parts(kind: SubjectKind, id: &str) -> AppResult<Self> {
        match kind {
            SubjectKind::User => Self::user(id),
            SubjectKind::Group => Self::group(id),
        }
    }

    /// Returns the subject kind.
    #[must_use]
    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::User(_) => SubjectKind::User,
            Self::Group(_) => SubjectKind::Group,
        }
    }

    /// Returns the raw identifier, regardless of kind.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::User(user_id) => user_id.as_str(),
            Self::Group(group_id) => group_id.as_str(),
        }
    }
}

impl Display for Subject {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}", self.kind().as_str(), self.id())
    }
}

/// Discriminant of [`Subject`], used as a storage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    /// See [`Subject::User`].
    User,
    /// See [`Subject::Group`].
    Group,
}

impl SubjectKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

impl FromStr for SubjectKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            _ => Err(AppError::Validation(format!(
                "unknown subject kind '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{GroupId, Subject, SubjectKind};

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(Subject::user("  ").is_err());
        assert!(Subject::group("").is_err());
    }

    #[test]
    fn anyone_group_is_a_regular_group() {
        let anyone = Subject::group(GroupId::ANYONE);
        assert!(matches!(anyone, Ok(Subject::Group(ref group)) if group == &GroupId::anyone()));
        assert_eq!(GroupId::anyone().as_str(), "Anyone");
    }

    #[test]
    fn subject_kind_roundtrip_storage_value() {
        for kind in [SubjectKind::User, SubjectKind::Group] {
            assert!(matches!(SubjectKind::from_str(kind.as_str()), Ok(parsed) if parsed == kind));
        }
        assert!(SubjectKind::from_str("robot").is_err());
    }

    #[test]
    fn subject_display_includes_kind() {
        let subject = Subject::user("7");
        assert!(matches!(subject, Ok(ref subject) if subject.to_string() == "user:7"));
    }
}
