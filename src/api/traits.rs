use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::core::deployment::DeploymentRecord;
use crate::core::project::{DeploymentSettings, ProjectConfiguration, SettingsPatch};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The project endpoints the doctor talks to, one method per endpoint.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// `GET /v9/projects/{id}`
    async fn get_project(&self, project_id: &str) -> ApiResult<ProjectConfiguration>;

    /// `GET /v1/projects/{id}`
    async fn get_settings(&self, project_id: &str) -> ApiResult<DeploymentSettings>;

    /// `PATCH /v1/projects/{id}`
    async fn update_settings(
        &self,
        project_id: &str,
        patch: &SettingsPatch,
    ) -> ApiResult<DeploymentSettings>;

    /// `GET /v6/deployments?projectId={id}&limit={n}`, most recent first.
    async fn list_deployments(
        &self,
        project_id: &str,
        limit: u32,
    ) -> ApiResult<Vec<DeploymentRecord>>;
}
