use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Project record returned by `GET /v9/projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub node_version: Option<String>,
    #[serde(default)]
    pub link: Option<GitLink>,
}

/// Association between a project and its source repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub repo: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub repo_id: Option<RepoId>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub git_credential_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// GitHub sends a numeric repository id, other providers a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoId::Number(n) => write!(f, "{}", n),
            RepoId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Git deployment settings read from and written to `/v1/projects/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_deploy_on_push: bool,
    #[serde(default)]
    pub production_branch: Option<String>,
    #[serde(default)]
    pub ignored_build_step: Option<String>,
}

/// Body of the settings mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub auto_deploy_on_push: bool,
    pub production_branch: String,
}

impl SettingsPatch {
    /// Enables auto-deploy and points production at `branch`.
    pub fn enable_auto_deploy(branch: &str) -> Self {
        Self {
            auto_deploy_on_push: true,
            production_branch: branch.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_with_github_link() {
        let json = r#"{
            "id": "prj_123",
            "name": "marketing-site",
            "accountId": "team_abc",
            "framework": "nextjs",
            "nodeVersion": "20.x",
            "link": {
                "type": "github",
                "repo": "OrgA/repoX",
                "repoId": 123456,
                "org": "OrgA",
                "gitCredentialId": "cred_1",
                "createdAt": 1700000000000
            },
            "env": []
        }"#;
        let project: ProjectConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "marketing-site");
        assert_eq!(project.framework.as_deref(), Some("nextjs"));
        let link = project.link.unwrap();
        assert_eq!(link.repo, "OrgA/repoX");
        assert_eq!(link.kind, "github");
        assert_eq!(link.repo_id, Some(RepoId::Number(123456)));
        assert_eq!(link.created_at, Some(1_700_000_000_000));
    }

    #[test]
    fn test_project_without_link() {
        let json = r#"{"id": "prj_123", "name": "site", "accountId": "acc"}"#;
        let project: ProjectConfiguration = serde_json::from_str(json).unwrap();
        assert!(project.link.is_none());
        assert!(project.framework.is_none());
        assert!(project.node_version.is_none());
    }

    #[test]
    fn test_repo_id_accepts_string() {
        let json = r#"{"type": "gitlab", "repo": "group/app", "repoId": "gl-42"}"#;
        let link: GitLink = serde_json::from_str(json).unwrap();
        assert_eq!(link.repo_id.unwrap().to_string(), "gl-42");
    }

    #[test]
    fn test_settings_default_when_fields_missing() {
        let settings: DeploymentSettings = serde_json::from_str(r#"{"id": "prj_1"}"#).unwrap();
        assert!(!settings.auto_deploy_on_push);
        assert!(settings.production_branch.is_none());
        assert!(settings.ignored_build_step.is_none());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{
            "id": "prj_123",
            "name": "site",
            "accountId": null,
            "framework": null,
            "link": {"type": null, "repo": null, "repoId": null}
        }"#;
        let project: ProjectConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(project.account_id, "");
        assert!(project.framework.is_none());
        let link = project.link.unwrap();
        assert_eq!(link.kind, "");
        assert_eq!(link.repo, "");
        assert!(link.repo_id.is_none());

        let settings: DeploymentSettings = serde_json::from_str(
            r#"{"autoDeployOnPush": null, "productionBranch": "main", "ignoredBuildStep": null}"#,
        )
        .unwrap();
        assert!(!settings.auto_deploy_on_push);
        assert_eq!(settings.production_branch.as_deref(), Some("main"));
    }

    #[test]
    fn test_patch_serializes_camel_case() {
        let patch = SettingsPatch::enable_auto_deploy("main");
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"autoDeployOnPush": true, "productionBranch": "main"})
        );
    }
}
