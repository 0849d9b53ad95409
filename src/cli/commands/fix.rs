use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use tracing::{debug, info};

use crate::api::traits::ProjectsApi;
use crate::cli::output::OutputFormatter;
use crate::cli::TargetArgs;
use crate::core::config::{Config, Target};
use crate::core::project::SettingsPatch;
use crate::core::report::{FixReport, ManualRelink, UpdateOutcome, Verification};

#[derive(Args, Debug, Clone, Default)]
pub struct FixArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Production branch to set
    #[arg(long, env = "DEPLOYDOCTOR_BRANCH")]
    pub branch: Option<String>,

    /// Show the change that would be sent without applying it
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(args: &FixArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_with(args, super::connect, &mut out).await
}

pub async fn execute_with<A, F, W>(args: &FixArgs, connect: F, out: &mut W) -> Result<()>
where
    A: ProjectsApi,
    F: FnOnce(&Config) -> Result<A>,
    W: Write,
{
    let config = args.target.resolve(args.branch.clone(), None)?;
    let api = connect(&config)?;
    let report = repair(&api, &config.target, args.dry_run).await;
    if report.applied() {
        info!(project = %config.target.project_id, "deployment settings updated");
    }
    OutputFormatter::new(&args.format).display_fix(&report, out)
}

/// Applies the auto-deploy/production-branch patch and re-reads the result.
///
/// Never fails: a rejected update or an unreadable verification is recorded
/// in the report so the operator still sees what happened.
pub async fn repair<A: ProjectsApi + ?Sized>(api: &A, target: &Target, dry_run: bool) -> FixReport {
    let requested = SettingsPatch::enable_auto_deploy(&target.production_branch);

    let update = if dry_run {
        UpdateOutcome::DryRun
    } else {
        match api.update_settings(&target.project_id, &requested).await {
            Ok(settings) => UpdateOutcome::Applied { settings },
            Err(err) => {
                debug!(error = %err, "settings update rejected");
                UpdateOutcome::Failed {
                    code: err.status(),
                    detail: err.detail(),
                }
            }
        }
    };

    let current = match api.get_settings(&target.project_id).await {
        Ok(settings) => Verification::Current { settings },
        Err(err) => {
            debug!(error = %err, "verification read failed");
            Verification::Unavailable {
                reason: err.to_string(),
            }
        }
    };

    FixReport {
        requested,
        update,
        current,
        manual_relink: ManualRelink {
            settings_url: target.git_settings_url(),
            repository: target.expected_repo.clone(),
        },
    }
}
