use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::traits::{ApiResult, ProjectsApi};
use crate::cli::progress::RequestProgress;
use crate::core::config::ApiConfig;
use crate::core::deployment::{DeploymentList, DeploymentRecord};
use crate::core::project::{DeploymentSettings, ProjectConfiguration, SettingsPatch};

const USER_AGENT: &str = concat!("deploydoctor/", env!("CARGO_PKG_VERSION"));

/// Client for the Vercel REST API.
pub struct VercelClient {
    base_url: Url,
    token: String,
    team_id: Option<String>,
    client: reqwest::Client,
    show_progress: bool,
}

impl VercelClient {
    pub fn new(config: &ApiConfig, team_id: Option<String>) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "not an http(s) base URL".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url,
            token: config.token.clone(),
            team_id,
            client,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> ApiResult<T> {
        let progress = RequestProgress::start(self.show_progress, context);
        let result = self.execute(request, context).await;
        progress.finish();
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> ApiResult<T> {
        let mut request = request.bearer_auth(&self.token);
        if let Some(team_id) = &self.team_id {
            request = request.query(&[("teamId", team_id.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%status, url = %response.url(), "{} response", context);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { context, source })
    }
}

#[async_trait]
impl ProjectsApi for VercelClient {
    async fn get_project(&self, project_id: &str) -> ApiResult<ProjectConfiguration> {
        let request = self.client.get(self.endpoint(&["v9", "projects", project_id]));
        self.send(request, "project").await
    }

    async fn get_settings(&self, project_id: &str) -> ApiResult<DeploymentSettings> {
        let request = self.client.get(self.endpoint(&["v1", "projects", project_id]));
        self.send(request, "settings").await
    }

    async fn update_settings(
        &self,
        project_id: &str,
        patch: &SettingsPatch,
    ) -> ApiResult<DeploymentSettings> {
        let request = self
            .client
            .patch(self.endpoint(&["v1", "projects", project_id]))
            .json(patch);
        self.send(request, "settings update").await
    }

    async fn list_deployments(
        &self,
        project_id: &str,
        limit: u32,
    ) -> ApiResult<Vec<DeploymentRecord>> {
        let limit = limit.to_string();
        let request = self
            .client
            .get(self.endpoint(&["v6", "deployments"]))
            .query(&[("projectId", project_id), ("limit", limit.as_str())]);
        let list: DeploymentList = self.send(request, "deployments").await?;
        Ok(list.deployments)
    }
}
