//! Shared primitives for all Rust crates in Rolegate.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::UserIdentity;

/// Result type used across Rolegate crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string with surrounding whitespace removed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        if trimmed.len() == value.len() {
            return Ok(Self(value));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A role grant or revocation was requested without a role.
    #[error("validation error: missing role")]
    MissingRole,

    /// Referenced permission template key does not resolve.
    #[error("permission template '{0}' was not found")]
    TemplateNotFound(String),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The resource query service failed to resolve candidates.
    #[error("resource query failed: {0}")]
    QueryService(String),

    /// A persistence operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::MissingRole => ErrorKind::MissingRole,
            Self::TemplateNotFound(_) => ErrorKind::TemplateNotFound,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::QueryService(_) => ErrorKind::QueryService,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Stable error categories, detached from error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`AppError::Validation`].
    Validation,
    /// See [`AppError::MissingRole`].
    MissingRole,
    /// See [`AppError::TemplateNotFound`].
    TemplateNotFound,
    /// See [`AppError::Unauthorized`].
    Unauthorized,
    /// See [`AppError::Forbidden`].
    Forbidden,
    /// See [`AppError::QueryService`].
    QueryService,
    /// See [`AppError::Storage`].
    Storage,
    /// See [`AppError::Internal`].
    Internal,
}

impl ErrorKind {
    /// Returns a stable transport value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::MissingRole => "missing_role",
            Self::TemplateNotFound => "template_not_found",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::QueryService => "query_service",
            Self::Storage => "storage",
            Self::Internal => "internal",
        }
    }
}
