use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use tracing::{debug, info};

use crate::api::traits::{ApiResult, ProjectsApi};
use crate::cli::output::OutputFormatter;
use crate::cli::TargetArgs;
use crate::core::config::{Config, Target};
use crate::core::diagnosis::RepositoryCheck;
use crate::core::report::CheckReport;

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,

    /// Number of recent deployments to list
    #[arg(long)]
    pub limit: Option<u32>,
}

pub async fn execute(args: &CheckArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_with(args, super::connect, &mut out).await
}

/// Resolves the configuration, connects, and renders the report to `out`.
///
/// `connect` runs only once a token is known, so a missing credential fails
/// before any request can be made.
pub async fn execute_with<A, F, W>(args: &CheckArgs, connect: F, out: &mut W) -> Result<()>
where
    A: ProjectsApi,
    F: FnOnce(&Config) -> Result<A>,
    W: Write,
{
    let config = args.target.resolve(None, args.limit)?;
    let api = connect(&config)?;
    let report = collect(&api, &config.target).await?;
    OutputFormatter::new(&args.format).display_check(&report, out)
}

fn optional<T>(result: ApiResult<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(error = %err, "{} unavailable, skipping section", what);
            None
        }
    }
}

/// Gathers the project, its settings and recent deployments.
///
/// Only the project fetch is mandatory; the other two sections are dropped
/// from the report when their request fails.
pub async fn collect<A: ProjectsApi + ?Sized>(api: &A, target: &Target) -> Result<CheckReport> {
    let project = api
        .get_project(&target.project_id)
        .await
        .with_context(|| format!("Error checking project {}", target.project_id))?;
    info!(project = %project.name, "fetched project configuration");

    let repository = RepositoryCheck::evaluate(&project, &target.expected_repo);
    if !repository.is_healthy() {
        debug!(?repository, "repository link needs attention");
    }

    let settings = optional(api.get_settings(&target.project_id).await, "deployment settings");
    let deployments = optional(
        api.list_deployments(&target.project_id, target.deployment_limit)
            .await,
        "deployment list",
    );

    Ok(CheckReport {
        project,
        repository,
        settings,
        deployments,
        deployment_limit: target.deployment_limit,
    })
}
