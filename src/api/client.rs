//! HTTP client for the GitHub issues endpoint.
//!
//! One job: POST a bug report to the issues endpoint and hand back the raw
//! response body. HTTP status is not interpreted here; callers decide
//! success by probing the body for `html_url`.

use std::fmt;
use std::time::Duration;

use reqwest::{header, Client};
use tracing::{debug, instrument, warn};

use super::auth;
use super::error::{ApiError, Result};
use super::types::NewIssue;

/// Base URL for the GitHub REST API.
const GITHUB_API_BASE: &str = "https://api.github.com";

/// User agent sent with every request, identifying the reporting tool.
const USER_AGENT: &str = "bugship-reporter";

/// Connect timeout in seconds. Submission happens from an interactive form,
/// so an unreachable network has to fail fast.
const CONNECT_TIMEOUT_SECS: u64 = 1;

/// The repository that receives filed reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTarget {
    /// The repository owner (user or organization).
    pub owner: String,
    /// The repository name.
    pub repo: String,
}

impl ReportTarget {
    /// Create a target from owner and repository name.
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    /// Parse an `owner/repo` slug.
    ///
    /// Returns `None` unless the slug has exactly one `/` separating two
    /// non-empty parts.
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, repo) = slug.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(Self::new(owner, repo))
    }

    /// The issues endpoint for this repository.
    fn issues_url(&self, base_url: &str) -> String {
        format!("{}/repos/{}/{}/issues", base_url, self.owner, self.repo)
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The GitHub API client.
///
/// Provides async methods for filing bug reports as issues.
#[derive(Debug, Clone)]
pub struct GithubClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the GitHub API.
    base_url: String,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// Create a client against a different API base URL.
    ///
    /// Use this for testing against a local server.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Self::build_http_client()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// File an issue and return the raw response body.
    ///
    /// The body is buffered fully and returned for any HTTP status.
    /// Non-success statuses are logged but not turned into errors, because
    /// the response text is what gets recorded upstream. Only transport
    /// failures produce an `Err`.
    #[instrument(skip(self, issue, token), fields(repo = %target))]
    pub async fn create_issue(
        &self,
        target: &ReportTarget,
        issue: &NewIssue,
        token: &str,
    ) -> Result<String> {
        let url = target.issues_url(&self.base_url);
        debug!("Filing issue");

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, auth::auth_header_value(token))
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json")
            .json(issue)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if status.is_success() {
            debug!(%status, "Issue filed");
        } else {
            let classified = ApiError::from_status(status, &target.to_string());
            warn!(%status, error = %classified, "GitHub rejected the issue");
        }

        Ok(raw)
    }

    /// Submit a report using the token stored in the keyring.
    ///
    /// Returns the raw response body, or an empty string when no token is
    /// stored or the request could not be sent at all. Callers treat any
    /// body without an `html_url` as a failed submission, so both cases
    /// surface the same way.
    #[instrument(skip_all, fields(repo = %target))]
    pub async fn submit_report(&self, target: &ReportTarget, issue: &NewIssue) -> String {
        self.submit_report_with(target, issue, auth::load_token())
            .await
    }

    /// Submit a report with an explicitly supplied token.
    ///
    /// `submit_report` feeds this the keyring token; tests supply their own.
    pub async fn submit_report_with(
        &self,
        target: &ReportTarget,
        issue: &NewIssue,
        token: Option<String>,
    ) -> String {
        let token = match token {
            Some(token) => token,
            None => {
                warn!("No reporter token stored; report not sent");
                return String::new();
            }
        };

        match self.create_issue(target, issue, &token).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Could not reach GitHub");
                String::new()
            }
        }
    }
}
