//! Scripted in-memory `ProjectsApi` for command tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::traits::{ApiResult, ProjectsApi};
use crate::core::deployment::DeploymentRecord;
use crate::core::project::{DeploymentSettings, ProjectConfiguration, SettingsPatch};

/// Canned outcome of one endpoint: a value or a status/body failure.
pub type Canned<T> = Result<T, (u16, String)>;

fn replay<T: Clone>(canned: &Canned<T>) -> ApiResult<T> {
    canned.clone().map_err(|(status, body)| ApiError::Status { status, body })
}

pub struct FakeApi {
    pub project: Canned<ProjectConfiguration>,
    pub settings: Canned<DeploymentSettings>,
    pub update: Canned<DeploymentSettings>,
    pub deployments: Canned<Vec<DeploymentRecord>>,
    calls: Arc<AtomicUsize>,
    patches: Mutex<Vec<SettingsPatch>>,
    limits: Mutex<Vec<u32>>,
}

impl FakeApi {
    pub fn new(project: ProjectConfiguration) -> Self {
        Self {
            project: Ok(project),
            settings: Ok(DeploymentSettings::default()),
            update: Ok(DeploymentSettings::default()),
            deployments: Ok(Vec::new()),
            calls: Arc::new(AtomicUsize::new(0)),
            patches: Mutex::new(Vec::new()),
            limits: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter, readable after the fake is dropped.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn patches(&self) -> Vec<SettingsPatch> {
        self.patches.lock().unwrap().clone()
    }

    pub fn limits(&self) -> Vec<u32> {
        self.limits.lock().unwrap().clone()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProjectsApi for FakeApi {
    async fn get_project(&self, _project_id: &str) -> ApiResult<ProjectConfiguration> {
        self.hit();
        replay(&self.project)
    }

    async fn get_settings(&self, _project_id: &str) -> ApiResult<DeploymentSettings> {
        self.hit();
        replay(&self.settings)
    }

    async fn update_settings(
        &self,
        _project_id: &str,
        patch: &SettingsPatch,
    ) -> ApiResult<DeploymentSettings> {
        self.hit();
        self.patches.lock().unwrap().push(patch.clone());
        replay(&self.update)
    }

    async fn list_deployments(
        &self,
        _project_id: &str,
        limit: u32,
    ) -> ApiResult<Vec<DeploymentRecord>> {
        self.hit();
        self.limits.lock().unwrap().push(limit);
        replay(&self.deployments)
    }
}

pub mod fixtures {
    use crate::core::deployment::{DeploymentMeta, DeploymentRecord, ReadyState};
    use crate::core::project::{GitLink, ProjectConfiguration, RepoId};

    pub fn project(repo: Option<&str>) -> ProjectConfiguration {
        ProjectConfiguration {
            id: "prj_test".to_string(),
            name: "marketing-site".to_string(),
            account_id: "team_test".to_string(),
            framework: Some("nextjs".to_string()),
            node_version: Some("20.x".to_string()),
            link: repo.map(|r| GitLink {
                repo: r.to_string(),
                kind: "github".to_string(),
                repo_id: Some(RepoId::Number(42)),
                org: Some("OrgA".to_string()),
                git_credential_id: None,
                created_at: Some(1_700_000_000_000),
            }),
        }
    }

    pub fn deployment(n: usize) -> DeploymentRecord {
        DeploymentRecord {
            url: Some(format!("site-{}.vercel.app", n)),
            ready_state: Some(ReadyState::Ready),
            created_at: Some(1_700_000_000_000 + n as i64),
            meta: Some(DeploymentMeta {
                github_commit_ref: Some("main".to_string()),
                github_commit_sha: Some(format!("{}abcdef0123456789", n)),
                github_commit_message: Some(format!("Commit number {}", n)),
                ..DeploymentMeta::default()
            }),
        }
    }
}
