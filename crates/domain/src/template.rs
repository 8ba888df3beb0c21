use rolegate_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceKey;
use crate::role::{RoleGrant, RoleName};
use crate::subject::{GroupId, Subject, UserId};

/// One role of a permission template and the subjects receiving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    role: RoleName,
    subjects: Vec<Subject>,
}

impl TemplateEntry {
    /// Creates an entry. Duplicate subjects collapse, first occurrence wins.
    #[must_use]
    pub fn new(role: RoleName, subjects: impl IntoIterator<Item = Subject>) -> Self {
        let mut entry = Self {
            role,
            subjects: Vec::new(),
        };
        entry.extend(subjects);
        entry
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> &RoleName {
        &self.role
    }

    /// Returns the subjects in template order.
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    fn extend(&mut self, subjects: impl IntoIterator<Item = Subject>) {
        for subject in subjects {
            if !self.subjects.contains(&subject) {
                self.subjects.push(subject);
            }
        }
    }
}

/// Grants of one role to subjects of one kind, applied in a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantBatch {
    /// Users receiving the role.
    Users {
        /// Granted role.
        role: RoleName,
        /// Grantees.
        user_ids: Vec<UserId>,
    },
    /// Groups receiving the role.
    Groups {
        /// Granted role.
        role: RoleName,
        /// Grantees.
        group_ids: Vec<GroupId>,
    },
}

impl GrantBatch {
    /// Returns the role granted by this batch.
    #[must_use]
    pub fn role(&self) -> &RoleName {
        match self {
            Self::Users { role, .. } | Self::Groups { role, .. } => role,
        }
    }

    /// Expands the batch into grant triples for the resource.
    #[must_use]
    pub fn grants_on(&self, resource: Option<&ResourceKey>) -> Vec<RoleGrant> {
        let subjects: Vec<Subject> = match self {
            Self::Users { user_ids, .. } => user_ids.iter().cloned().map(Subject::User).collect(),
            Self::Groups { group_ids, .. } => {
                group_ids.iter().cloned().map(Subject::Group).collect()
            }
        };

        subjects
            .into_iter()
            .map(|subject| RoleGrant::new(subject, self.role().clone(), resource.cloned()))
            .collect()
    }
}

/// Named, reusable bundle of role assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTemplate {
    key: NonEmptyString,
    name: NonEmptyString,
    description: Option<String>,
    entries: Vec<TemplateEntry>,
}

impl PermissionTemplate {
    /// Creates a template. Entries sharing a role are merged in first-seen order.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        entries: impl IntoIterator<Item = TemplateEntry>,
    ) -> AppResult<Self> {
        let mut merged: Vec<TemplateEntry> = Vec::new();
        for entry in entries {
            match merged.iter_mut().find(|existing| existing.role == entry.role) {
                Some(existing) => existing.extend(entry.subjects),
                None => merged.push(entry),
            }
        }

        Ok(Self {
            key: NonEmptyString::new(key)?,
            name: NonEmptyString::new(name)?,
            description: description.filter(|value| !value.trim().is_empty()),
            entries: merged,
        })
    }

    /// Returns the unique template key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns role entries in template order.
    #[must_use]
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Splits entries into one user batch and one group batch per role.
    #[must_use]
    pub fn grant_batches(&self) -> Vec<GrantBatch> {
        let mut batches = Vec::new();
        for entry in &self.entries {
            let mut user_ids = Vec::new();
            let mut group_ids = Vec::new();
            for subject in &entry.subjects {
                match subject {
                    Subject::User(user_id) => user_ids.push(user_id.clone()),
                    Subject::Group(group_id) => group_ids.push(group_id.clone()),
                }
            }

            if !user_ids.is_empty() {
                batches.push(GrantBatch::Users {
                    role: entry.role.clone(),
                    user_ids,
                });
            }
            if !group_ids.is_empty() {
                batches.push(GrantBatch::Groups {
                    role: entry.role.clone(),
                    group_ids,
                });
            }
        }

        batches
    }
}
