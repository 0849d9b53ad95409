use colored::*;
use std::io::Write;

use crate::api::error::ApiError;
use crate::core::config::ConfigError;
use crate::core::deployment::format_timestamp;
use crate::core::diagnosis::RepositoryCheck;
use crate::core::project::DeploymentSettings;
use crate::core::report::{CheckReport, FixReport, UpdateOutcome, Verification};

const RULE_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 20;

fn rule() -> String {
    "═".repeat(RULE_WIDTH)
}

fn or_default<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

fn auto_deploy_label(enabled: bool) -> ColoredString {
    if enabled {
        "Enabled".green()
    } else {
        "Disabled".red()
    }
}

pub struct OutputFormatter {
    format: String,
}

impl OutputFormatter {
    pub fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
        }
    }

    pub fn display_check<W: Write>(&self, report: &CheckReport, out: &mut W) -> anyhow::Result<()> {
        match self.format.as_str() {
            "json" => display_json(report, out),
            _ => display_check_table(report, out),
        }
    }

    pub fn display_fix<W: Write>(&self, report: &FixReport, out: &mut W) -> anyhow::Result<()> {
        match self.format.as_str() {
            "json" => display_json(report, out),
            _ => display_fix_table(report, out),
        }
    }
}

fn display_json<T: serde::Serialize, W: Write>(report: &T, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{}", rule())
}

fn field<W: Write>(out: &mut W, label: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
    writeln!(out, "{:<width$}{}", format!("{}:", label), value, width = LABEL_WIDTH)
}

fn display_check_table<W: Write>(report: &CheckReport, out: &mut W) -> anyhow::Result<()> {
    let project = &report.project;

    section(out, "VERCEL PROJECT CONFIGURATION")?;
    field(out, "Project Name", &project.name)?;
    field(out, "Project ID", &project.id)?;
    field(out, "Account ID", or_default(Some(project.account_id.as_str()), "N/A"))?;
    field(out, "Framework", or_default(project.framework.as_deref(), "Not set"))?;
    field(out, "Node Version", or_default(project.node_version.as_deref(), "Not set"))?;
    writeln!(out, "{}", rule())?;

    section(out, "GIT CONNECTION")?;
    if let Some(link) = &project.link {
        field(out, "Repository", link.repo.cyan())?;
        field(out, "Type", or_default(Some(link.kind.as_str()), "N/A"))?;
        field(
            out,
            "Repo ID",
            link.repo_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        )?;
        field(out, "Org", or_default(link.org.as_deref(), "N/A"))?;
        field(out, "Git Credential", or_default(link.git_credential_id.as_deref(), "N/A"))?;
        field(out, "Created", format_timestamp(link.created_at))?;
    }

    match &report.repository {
        RepositoryCheck::Matches { .. } => {
            writeln!(out)?;
            writeln!(out, "{}", "Repository connection looks correct!".green().bold())?;
        }
        RepositoryCheck::Mismatch { actual, expected } => {
            writeln!(out)?;
            writeln!(out, "{}", "WARNING: Repository mismatch detected!".yellow().bold())?;
            writeln!(out, "   Current:  {}", actual)?;
            writeln!(out, "   Expected: {}", expected)?;
            writeln!(out)?;
            writeln!(out, "   This is why auto-deployments are not working!")?;
        }
        RepositoryCheck::NotConnected => {
            writeln!(out, "{}", "No Git repository connected!".red().bold())?;
            writeln!(out, "   This is why auto-deployments are not working!")?;
        }
    }

    if let Some(settings) = &report.settings {
        section(out, "DEPLOYMENT SETTINGS")?;
        field(out, "Auto-deploy", auto_deploy_label(settings.auto_deploy_on_push))?;
        field(
            out,
            "Production Branch",
            or_default(settings.production_branch.as_deref(), "Not set"),
        )?;
        field(
            out,
            "Ignored Build Step",
            or_default(settings.ignored_build_step.as_deref(), "None"),
        )?;
    }

    if let Some(deployments) = &report.deployments {
        section(
            out,
            &format!("RECENT DEPLOYMENTS (last {})", report.deployment_limit),
        )?;
        if deployments.is_empty() {
            writeln!(out, "No deployments found")?;
        }
        for (index, deployment) in deployments.iter().enumerate() {
            writeln!(out)?;
            writeln!(
                out,
                "{}. {}",
                index + 1,
                or_default(deployment.url.as_deref(), "N/A")
            )?;
            writeln!(
                out,
                "   Status: {}",
                deployment
                    .ready_state
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            )?;
            writeln!(out, "   Branch: {}", or_default(deployment.branch(), "N/A"))?;
            writeln!(out, "   Commit: {}", or_default(deployment.short_sha(), "N/A"))?;
            writeln!(out, "   Message: {}", or_default(deployment.commit_message(), "N/A"))?;
            writeln!(out, "   Created: {}", format_timestamp(deployment.created_at))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out)?;
    writeln!(out, "{}", "Check complete!".green().bold())?;
    writeln!(out)?;
    Ok(())
}

fn settings_lines<W: Write>(out: &mut W, settings: &DeploymentSettings) -> std::io::Result<()> {
    writeln!(out, "   Auto-deploy: {}", auto_deploy_label(settings.auto_deploy_on_push))?;
    writeln!(
        out,
        "   Production Branch: {}",
        or_default(settings.production_branch.as_deref(), "Not set")
    )
}

fn display_fix_table<W: Write>(report: &FixReport, out: &mut W) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Fixing Vercel Project Configuration...".bold())?;
    writeln!(out)?;

    match &report.update {
        UpdateOutcome::Applied { settings } => {
            writeln!(out, "{}", "Successfully updated project settings!".green())?;
            settings_lines(out, settings)?;
        }
        UpdateOutcome::Failed { detail, .. } => {
            writeln!(out, "{}", "WARNING: Could not update project settings".yellow())?;
            writeln!(out, "   Error: {}", detail)?;
        }
        UpdateOutcome::DryRun => {
            writeln!(
                out,
                "{} Would send: {}",
                "DRY-RUN".cyan(),
                serde_json::to_string(&report.requested)?
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "Current Configuration:".bold())?;
    match &report.current {
        Verification::Current { settings } => settings_lines(out, settings)?,
        Verification::Unavailable { reason } => {
            writeln!(out, "   {} {}", "Unavailable:".yellow(), reason)?;
        }
    }

    let relink = &report.manual_relink;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "IMPORTANT: Repository connection must be fixed manually!"
            .yellow()
            .bold()
    )?;
    writeln!(out, "   1. Go to: {}", relink.settings_url)?;
    writeln!(out, "   2. Click \"Disconnect\"")?;
    writeln!(out, "   3. Click \"Connect Git Repository\"")?;
    writeln!(out, "   4. Select: {}", relink.repository)?;
    writeln!(out)?;
    Ok(())
}

const TOKENS_URL: &str = "https://vercel.com/account/tokens";

/// Remediation text for a failed run, if the failure has a known fix.
pub fn failure_hints(err: &anyhow::Error) -> Vec<String> {
    for cause in err.chain() {
        if let Some(ConfigError::MissingToken { env }) = cause.downcast_ref::<ConfigError>() {
            return vec![
                "To get your token:".to_string(),
                format!("1. Go to {}", TOKENS_URL),
                "2. Create a new token".to_string(),
                format!("3. Run: {}=your_token deploydoctor check", env),
            ];
        }
        if let Some(api_err) = cause.downcast_ref::<ApiError>() {
            if api_err.is_auth() {
                return vec![
                    "Tip: Your token might be invalid or expired.".to_string(),
                    format!("   Get a new token at: {}", TOKENS_URL),
                ];
            }
        }
    }
    Vec::new()
}

pub fn report_failure(err: &anyhow::Error) {
    eprintln!();
    eprintln!("{} {:#}", "Error:".red().bold(), err);
    let hints = failure_hints(err);
    if !hints.is_empty() {
        eprintln!();
        for hint in hints {
            eprintln!("{}", hint);
        }
    }
}

#[cfg(test)]
pub(crate) fn render_plain<F>(render: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
{
    colored::control::set_override(false);
    let mut buf = Vec::new();
    render(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}
