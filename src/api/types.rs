//! Issue payloads and response probing.
//!
//! Bug reports are filed through `POST /repos/{owner}/{repo}/issues`. The
//! response is kept as raw JSON and probed for the fields we care about
//! rather than deserialized into a full issue model.

use serde::{Deserialize, Serialize};

/// Label attached to every report so auto-filed issues can be triaged
/// separately from hand-written ones.
pub const AUTO_REPORT_LABEL: &str = "AutoBugReport";

/// Payload for creating an issue.
///
/// Sent as the JSON body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    /// The issue title.
    pub title: String,
    /// The issue body in GitHub-flavored markdown.
    pub body: String,
    /// Labels to attach on creation.
    pub labels: Vec<String>,
}

impl NewIssue {
    /// Build an issue payload carrying the auto-report label.
    pub fn auto_report(title: String, body: String) -> Self {
        Self {
            title,
            body,
            labels: vec![AUTO_REPORT_LABEL.to_string()],
        }
    }
}

/// Pull the `html_url` of the created issue out of a raw API response.
///
/// A submission succeeded exactly when the response carries an `html_url`
/// string; anything else (error payloads, HTML error pages, an empty body)
/// yields `None`. The key is searched depth-first so a top-level match wins,
/// but a nested one still counts.
pub fn extract_html_url(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    find_string_value(&value, "html_url")
}

fn find_string_value(value: &serde_json::Value, key: &str) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(s)) = map.get(key) {
                return Some(s.clone());
            }
            map.values().find_map(|v| find_string_value(v, key))
        }
        serde_json::Value::Array(items) => {
            items.iter().find_map(|v| find_string_value(v, key))
        }
        _ => None,
    }
}
