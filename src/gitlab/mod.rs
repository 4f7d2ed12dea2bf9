//! Hosting-platform client (GitLab REST API v4).
//!
//! Only the three calls the distribution flow needs: username lookup,
//! project creation, and member addition. [`GitLabClient::create_group_repositories`]
//! drives them for a whole [`GroupMap`]: every record's username is
//! verified against the user directory, groups without a single valid
//! user are skipped with a warning, one project per group is created
//! under the configured target namespace using the sanitized name, and
//! each verified member is granted access. Failing to add a single
//! member does not abort the batch; failing to create a project does.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::RemoteSection;
use crate::naming::{GroupMap, USERNAME_COLUMN};

/// Environment variable holding the API base URL.
pub const GITLAB_URL_ENV: &str = "REPODIST_GITLAB_URL";

/// Environment variable holding the private token.
pub const GITLAB_TOKEN_ENV: &str = "REPODIST_GITLAB_TOKEN";

/// Default API base URL when [`GITLAB_URL_ENV`] is unset.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// GitLab access level for guests.
pub const GUEST_ACCESS: u32 = 10;

/// GitLab access level for developers.
pub const DEVELOPER_ACCESS: u32 = 30;

/// Errors from the hosting-platform client.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// No private token was configured.
    #[error("no GitLab token configured ({GITLAB_TOKEN_ENV} is not set)")]
    MissingToken,

    /// An HTTP request failed or returned a non-success status.
    #[error("GitLab request failed: {operation}")]
    Request {
        /// What the client was doing, for the error message.
        operation: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A platform user, as returned by the user directory.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Numeric user id.
    pub id: u64,
    /// Login name.
    pub username: String,
}

/// A created project.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Numeric project id.
    pub id: u64,
    /// Project name as the platform stored it.
    pub name: String,
    /// Browsable URL, when the platform reports one.
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Minimal GitLab REST client bound to one base URL and token.
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitLabClient {
    /// Create a client for `base_url` authenticating with `token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Create a client from `REPODIST_GITLAB_URL` / `REPODIST_GITLAB_TOKEN`.
    pub fn from_env() -> Result<Self, GitLabError> {
        let url = std::env::var(GITLAB_URL_ENV).ok();
        let token = std::env::var(GITLAB_TOKEN_ENV).ok();
        let (url, token) = resolve_endpoint(url, token)?;
        Ok(Self::new(url, token))
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4/{path}", self.base_url)
    }

    /// Look a user up by exact username.
    ///
    /// Returns `None` when the user directory has no match.
    pub async fn find_user(&self, username: &str) -> Result<Option<User>, GitLabError> {
        let users: Vec<User> = self
            .http
            .get(self.api_url("users"))
            .header("PRIVATE-TOKEN", &self.token)
            .query(&[("username", username)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| GitLabError::Request {
                operation: format!("looking up user {username}"),
                source,
            })?
            .json()
            .await
            .map_err(|source| GitLabError::Request {
                operation: format!("decoding user lookup for {username}"),
                source,
            })?;
        Ok(users.into_iter().next())
    }

    /// Create a project named `name` in the namespace `namespace_id`.
    pub async fn create_project(
        &self,
        name: &str,
        namespace_id: u64,
    ) -> Result<Project, GitLabError> {
        self.http
            .post(self.api_url("projects"))
            .header("PRIVATE-TOKEN", &self.token)
            .json(&json!({ "name": name, "namespace_id": namespace_id }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| GitLabError::Request {
                operation: format!("creating repository {name}"),
                source,
            })?
            .json()
            .await
            .map_err(|source| GitLabError::Request {
                operation: format!("decoding created repository {name}"),
                source,
            })
    }

    /// Grant `user_id` access to `project_id` at `access_level`.
    pub async fn add_member(
        &self,
        project_id: u64,
        user_id: u64,
        access_level: u32,
    ) -> Result<(), GitLabError> {
        self.http
            .post(self.api_url(&format!("projects/{project_id}/members")))
            .header("PRIVATE-TOKEN", &self.token)
            .json(&json!({ "user_id": user_id, "access_level": access_level }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| GitLabError::Request {
                operation: format!("adding user {user_id} to project {project_id}"),
                source,
            })?;
        Ok(())
    }

    /// Create one project per group and grant the verified members access.
    pub async fn create_group_repositories(
        &self,
        groups: &GroupMap,
        remote: &RemoteSection,
    ) -> Result<(), GitLabError> {
        let namespace_id = remote.code_repository_target_group_id;
        let access_level = if remote.add_users_as_guests {
            GUEST_ACCESS
        } else {
            DEVELOPER_ACCESS
        };

        info!("creating repositories online");
        for group in groups.values() {
            let mut valid_users = Vec::new();
            for record in &group.records {
                let Some(username) = record.get(USERNAME_COLUMN) else {
                    continue;
                };
                match self.find_user(username).await? {
                    Some(user) => valid_users.push(user),
                    None => warn!(username = %username, "user not found on the platform"),
                }
            }

            if valid_users.is_empty() {
                warn!(
                    name = %group.name,
                    "no valid users found; skipping repository creation"
                );
                continue;
            }

            let project = self.create_project(&group.name, namespace_id).await?;
            for user in &valid_users {
                if let Err(e) = self.add_member(project.id, user.id, access_level).await {
                    warn!(
                        username = %user.username,
                        project = %project.name,
                        error = %e,
                        "failed to add user to project"
                    );
                }
            }
            info!(name = %project.name, id = project.id, "repository created");
        }

        Ok(())
    }
}

/// Resolve the API endpoint from optional environment values.
fn resolve_endpoint(
    url: Option<String>,
    token: Option<String>,
) -> Result<(String, String), GitLabError> {
    let url = match url {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_GITLAB_URL.to_string(),
    };
    match token {
        Some(token) if !token.is_empty() => Ok((url, token)),
        _ => Err(GitLabError::MissingToken),
    }
}
