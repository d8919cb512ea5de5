//! GitHub REST client for filing bug reports as issues.

mod auth;
mod client;
mod error;
mod types;

pub use auth::{delete_token, has_token, store_token};
pub use client::{GithubClient, ReportTarget};
pub use error::ApiError;
pub use types::{extract_html_url, NewIssue};
