use serde::Serialize;

use crate::core::project::ProjectConfiguration;

/// Outcome of comparing the project's linked repository with the expected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepositoryCheck {
    Matches { repository: String },
    Mismatch { actual: String, expected: String },
    NotConnected,
}

impl RepositoryCheck {
    pub fn evaluate(project: &ProjectConfiguration, expected: &str) -> Self {
        match &project.link {
            None => RepositoryCheck::NotConnected,
            Some(link) if link.repo.eq_ignore_ascii_case(expected) => RepositoryCheck::Matches {
                repository: link.repo.clone(),
            },
            Some(link) => RepositoryCheck::Mismatch {
                actual: link.repo.clone(),
                expected: expected.to_string(),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, RepositoryCheck::Matches { .. })
    }
}
