pub mod commands;
pub mod output;
pub mod progress;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::config::{Config, ConfigError, FileConfig, Overrides};

#[derive(Parser, Debug)]
#[command(
    name = "deploydoctor",
    version,
    about = "Diagnose and repair a Vercel project's deployment settings"
)]
pub struct Cli {
    /// Log request details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report the project's Git link, deployment settings and recent deployments
    Check(commands::check::CheckArgs),
    /// Enable auto-deploy and set the production branch
    Fix(commands::fix::FixArgs),
}

/// Which project to talk to, and how.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Vercel API token
    #[arg(long, env = "VERCEL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Project to inspect
    #[arg(long, env = "VERCEL_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Team that owns the project, sent as `teamId`
    #[arg(long, env = "VERCEL_TEAM_ID")]
    pub team_id: Option<String>,

    /// Repository the project should be linked to (owner/name)
    #[arg(long, env = "DEPLOYDOCTOR_EXPECTED_REPO")]
    pub expected_repo: Option<String>,

    /// Base URL of the Vercel API
    #[arg(long, env = "VERCEL_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file (defaults to ./.deploydoctor.yml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl TargetArgs {
    pub fn resolve(
        &self,
        production_branch: Option<String>,
        deployment_limit: Option<u32>,
    ) -> Result<Config, ConfigError> {
        let file = match &self.config {
            Some(path) => FileConfig::load_file(path)?,
            None => FileConfig::load(Path::new("."))?,
        };

        let overrides = Overrides {
            token: self.token.clone(),
            project_id: self.project_id.clone(),
            team_id: self.team_id.clone(),
            expected_repo: self.expected_repo.clone(),
            production_branch,
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            deployment_limit,
        };
        Config::resolve(overrides, file)
    }
}

#[cfg(test)]
impl TargetArgs {
    /// Points `config` at an empty file in `dir`, so resolution never reads
    /// the working directory.
    pub fn isolated_in(&self, dir: &Path) -> Self {
        let path = dir.join(crate::core::config::CONFIG_FILE_NAME);
        std::fs::write(&path, "").unwrap();
        Self {
            config: Some(path),
            ..self.clone()
        }
    }
}
