use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const TOKEN_ENV: &str = "VERCEL_TOKEN";
pub const CONFIG_FILE_NAME: &str = ".deploydoctor.yml";

pub const DEFAULT_API_URL: &str = "https://api.vercel.com";
pub const DEFAULT_PROJECT_ID: &str = "prj_hGUzz36fOGPv5xtliIimZML5hcWM";
pub const DEFAULT_EXPECTED_REPO: &str = "ArvadoIT/Arvadofinal";
pub const DEFAULT_PRODUCTION_BRANCH: &str = "main";
pub const DEFAULT_DASHBOARD_PROJECT: &str = "arvadofinaldeploy";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_DEPLOYMENT_LIMIT: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{env} environment variable is required")]
    MissingToken { env: &'static str },

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Contents of `.deploydoctor.yml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub project_id: Option<String>,
    pub team_id: Option<String>,
    pub team_slug: Option<String>,
    pub dashboard_project: Option<String>,
    pub expected_repo: Option<String>,
    pub production_branch: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub deployment_limit: Option<u32>,
}

impl FileConfig {
    /// Loads `.deploydoctor.yml` from `dir`, or the defaults when there is none.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(FileConfig::default());
        }
        Self::load_file(&path)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(FileConfig::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::InvalidFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub project_id: Option<String>,
    pub team_id: Option<String>,
    pub expected_repo: Option<String>,
    pub production_branch: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub deployment_limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

/// The project one run operates on and what it should look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub project_id: String,
    pub team_id: Option<String>,
    pub team_slug: Option<String>,
    pub dashboard_project: String,
    pub expected_repo: String,
    pub production_branch: String,
    pub deployment_limit: u32,
}

impl Target {
    pub fn git_settings_url(&self) -> String {
        format!(
            "https://vercel.com/{}/{}/settings/git",
            self.team_slug.as_deref().unwrap_or("[your-team]"),
            self.dashboard_project
        )
    }
}

impl Default for Target {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            team_id: None,
            team_slug: None,
            dashboard_project: DEFAULT_DASHBOARD_PROJECT.to_string(),
            expected_repo: DEFAULT_EXPECTED_REPO.to_string(),
            production_branch: DEFAULT_PRODUCTION_BRANCH.to_string(),
            deployment_limit: DEFAULT_DEPLOYMENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub target: Target,
}

impl Config {
    /// Layers overrides over the file config over the built-in defaults.
    ///
    /// Fails with [`ConfigError::MissingToken`] when no non-blank token was
    /// supplied, before anything touches the network.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self, ConfigError> {
        let token = overrides
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken { env: TOKEN_ENV })?;

        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout",
                reason: "must be at least 1 second".to_string(),
            });
        }

        let deployment_limit = overrides
            .deployment_limit
            .or(file.deployment_limit)
            .unwrap_or(DEFAULT_DEPLOYMENT_LIMIT);
        if deployment_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "deployment_limit",
                reason: "must be at least 1".to_string(),
            });
        }

        let defaults = Target::default();
        let target = Target {
            project_id: overrides
                .project_id
                .or(file.project_id)
                .unwrap_or(defaults.project_id),
            team_id: overrides.team_id.or(file.team_id),
            team_slug: file.team_slug,
            dashboard_project: file.dashboard_project.unwrap_or(defaults.dashboard_project),
            expected_repo: overrides
                .expected_repo
                .or(file.expected_repo)
                .unwrap_or(defaults.expected_repo),
            production_branch: overrides
                .production_branch
                .or(file.production_branch)
                .unwrap_or(defaults.production_branch),
            deployment_limit,
        };

        let base_url = overrides
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            api: ApiConfig {
                base_url,
                token,
                timeout: Duration::from_secs(timeout_secs),
            },
            target,
        })
    }
}
