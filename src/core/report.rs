use serde::Serialize;

use crate::core::deployment::DeploymentRecord;
use crate::core::diagnosis::RepositoryCheck;
use crate::core::project::{DeploymentSettings, ProjectConfiguration, SettingsPatch};

/// Everything `check` learned about one project.
///
/// `settings` and `deployments` are `None` when their fetch failed; the
/// project itself is mandatory.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub project: ProjectConfiguration,
    pub repository: RepositoryCheck,
    pub settings: Option<DeploymentSettings>,
    pub deployments: Option<Vec<DeploymentRecord>>,
    pub deployment_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Applied { settings: DeploymentSettings },
    Failed { code: Option<u16>, detail: String },
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verification {
    Current { settings: DeploymentSettings },
    Unavailable { reason: String },
}

/// Steps the operator must take by hand to re-link the repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualRelink {
    pub settings_url: String,
    pub repository: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub requested: SettingsPatch,
    pub update: UpdateOutcome,
    pub current: Verification,
    pub manual_relink: ManualRelink,
}

impl FixReport {
    pub fn applied(&self) -> bool {
        matches!(self.update, UpdateOutcome::Applied { .. })
    }
}
