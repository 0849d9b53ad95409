use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadyState {
    Queued,
    Initializing,
    Building,
    Ready,
    Error,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadyState::Queued => write!(f, "QUEUED"),
            ReadyState::Initializing => write!(f, "INITIALIZING"),
            ReadyState::Building => write!(f, "BUILDING"),
            ReadyState::Ready => write!(f, "READY"),
            ReadyState::Error => write!(f, "ERROR"),
            ReadyState::Canceled => write!(f, "CANCELED"),
            ReadyState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Source metadata attached to a deployment by the git integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentMeta {
    #[serde(default)]
    pub github_commit_ref: Option<String>,
    #[serde(default)]
    pub github_commit_sha: Option<String>,
    #[serde(default)]
    pub github_commit_message: Option<String>,
    #[serde(default)]
    pub gitlab_commit_ref: Option<String>,
    #[serde(default)]
    pub gitlab_commit_sha: Option<String>,
    #[serde(default)]
    pub gitlab_commit_message: Option<String>,
    #[serde(default)]
    pub bitbucket_commit_ref: Option<String>,
    #[serde(default)]
    pub bitbucket_commit_sha: Option<String>,
    #[serde(default)]
    pub bitbucket_commit_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ready_state: Option<ReadyState>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub meta: Option<DeploymentMeta>,
}

impl DeploymentRecord {
    pub fn branch(&self) -> Option<&str> {
        let meta = self.meta.as_ref()?;
        meta.github_commit_ref
            .as_deref()
            .or(meta.gitlab_commit_ref.as_deref())
            .or(meta.bitbucket_commit_ref.as_deref())
    }

    pub fn commit_sha(&self) -> Option<&str> {
        let meta = self.meta.as_ref()?;
        meta.github_commit_sha
            .as_deref()
            .or(meta.gitlab_commit_sha.as_deref())
            .or(meta.bitbucket_commit_sha.as_deref())
    }

    pub fn commit_message(&self) -> Option<&str> {
        let meta = self.meta.as_ref()?;
        meta.github_commit_message
            .as_deref()
            .or(meta.gitlab_commit_message.as_deref())
            .or(meta.bitbucket_commit_message.as_deref())
    }

    /// First 7 characters of the commit sha.
    pub fn short_sha(&self) -> Option<&str> {
        self.commit_sha().map(short_hash)
    }
}

/// Envelope of `GET /v6/deployments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentList {
    #[serde(default)]
    pub deployments: Vec<DeploymentRecord>,
}

pub fn short_hash(sha: &str) -> &str {
    match sha.char_indices().nth(7) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// Renders an epoch-milliseconds timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash_truncates_to_seven() {
        assert_eq!(short_hash("a1b2c3d4e5f6"), "a1b2c3d");
        assert_eq!(short_hash("abc"), "abc");
        assert_eq!(short_hash(""), "");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(Some(1_700_000_000_000)),
            "2023-11-14 22:13:20 UTC"
        );
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_deployment_list_parses_github_meta() {
        let json = r#"{
            "deployments": [{
                "uid": "dpl_1",
                "url": "site-abc.vercel.app",
                "readyState": "READY",
                "createdAt": 1700000000000,
                "meta": {
                    "githubCommitRef": "main",
                    "githubCommitSha": "0123456789abcdef",
                    "githubCommitMessage": "Update hero copy"
                }
            }],
            "pagination": {"count": 1}
        }"#;
        let list: DeploymentList = serde_json::from_str(json).unwrap();
        assert_eq!(list.deployments.len(), 1);
        let d = &list.deployments[0];
        assert_eq!(d.ready_state, Some(ReadyState::Ready));
        assert_eq!(d.branch(), Some("main"));
        assert_eq!(d.short_sha(), Some("0123456"));
        assert_eq!(d.commit_message(), Some("Update hero copy"));
    }

    #[test]
    fn test_meta_falls_back_to_gitlab() {
        let json = r#"{"meta": {"gitlabCommitRef": "develop", "gitlabCommitSha": "ffffeeee1111"}}"#;
        let d: DeploymentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(d.branch(), Some("develop"));
        assert_eq!(d.short_sha(), Some("ffffeee"));
        assert_eq!(d.commit_message(), None);
    }

    #[test]
    fn test_unrecognized_ready_state() {
        let d: DeploymentRecord = serde_json::from_str(r#"{"readyState": "DELETED"}"#).unwrap();
        assert_eq!(d.ready_state, Some(ReadyState::Unknown));
    }
}
