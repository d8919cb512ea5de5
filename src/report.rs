//! Bug report validation and body composition.
//!
//! A report starts as free-form text in the form view, gets validated,
//! and is composed into the final issue body: the steps the reporter
//! typed, an optional `@username email` contact line, and the tail of the
//! application log.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::api::NewIssue;

/// Placeholder text shown in the title field.
pub const TITLE_PLACEHOLDER: &str = "[Please briefly describe what went wrong]";

/// Placeholder text shown in the steps field.
pub const STEPS_PLACEHOLDER: &str = "[Steps you took before something went wrong]";

/// Why a report was rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty or still the placeholder.
    MissingTitle,
    /// The steps text is empty or still the placeholder.
    MissingSteps,
}

impl ValidationError {
    /// The message shown in the input-required notice.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingTitle => "Please briefly describe what went wrong.",
            Self::MissingSteps => {
                "Please describe steps you took before something went wrong."
            }
        }
    }
}

/// The text a reporter filled into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    /// Issue title.
    pub title: String,
    /// Steps taken before the problem appeared; becomes the body.
    pub steps: String,
    /// Optional GitHub username of the reporter.
    pub username: String,
    /// Optional reporter email.
    pub email: String,
}

impl ReportDraft {
    /// Check that the draft is submittable.
    ///
    /// The title and steps must both be filled in with something other
    /// than their placeholder text. Optional fields are not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() || self.title == TITLE_PLACEHOLDER {
            return Err(ValidationError::MissingTitle);
        }
        if self.steps.is_empty() || self.steps == STEPS_PLACEHOLDER {
            return Err(ValidationError::MissingSteps);
        }
        Ok(())
    }

    /// Compose the issue body from the draft and the attached log lines.
    ///
    /// A non-empty username contributes a `@username email` contact line
    /// (the space is emitted even when the email is empty). The log lines
    /// follow after a blank line, one per line with a trailing newline; no
    /// log still leaves the separator in place.
    pub fn compose_body(&self, log_lines: &[String]) -> String {
        let mut body = self.steps.clone();

        if !self.username.is_empty() {
            body.push_str("\n\n@");
            body.push_str(&self.username);
            body.push(' ');
            body.push_str(&self.email);
        }

        body.push_str("\n\n");

        for line in log_lines {
            body.push_str(line);
            body.push('\n');
        }

        body
    }

    /// Build the issue payload for this draft.
    pub fn to_issue(&self, log_lines: &[String]) -> NewIssue {
        NewIssue::auto_report(self.title.clone(), self.compose_body(log_lines))
    }
}

/// Read the log file attached to reports, one entry per line.
///
/// A missing or unreadable file contributes no lines; the report still
/// goes out without it.
pub fn read_log_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Could not read log file");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, steps: &str) -> ReportDraft {
        ReportDraft {
            title: title.to_string(),
            steps: steps.to_string(),
            ..ReportDraft::default()
        }
    }

    #[test]
    fn test_validate_accepts_filled_draft() {
        assert!(draft("Crash on open", "1. open a file").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        assert_eq!(
            draft("", "steps").validate(),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_validate_rejects_placeholder_title() {
        assert_eq!(
            draft(TITLE_PLACEHOLDER, "steps").validate(),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_validate_rejects_empty_steps() {
        assert_eq!(
            draft("title", "").validate(),
            Err(ValidationError::MissingSteps)
        );
    }

    #[test]
    fn test_validate_rejects_placeholder_steps() {
        assert_eq!(
            draft("title", STEPS_PLACEHOLDER).validate(),
            Err(ValidationError::MissingSteps)
        );
    }

    #[test]
    fn test_validate_checks_title_first() {
        assert_eq!(draft("", "").validate(), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_compose_body_without_contact_or_log() {
        let body = draft("t", "the steps").compose_body(&[]);
        assert_eq!(body, "the steps\n\n");
    }

    #[test]
    fn test_compose_body_with_contact_line() {
        let mut d = draft("t", "the steps");
        d.username = "reporter".to_string();
        d.email = "reporter@example.com".to_string();

        let body = d.compose_body(&[]);
        assert_eq!(body, "the steps\n\n@reporter reporter@example.com\n\n");
    }

    #[test]
    fn test_compose_body_contact_line_with_empty_email() {
        let mut d = draft("t", "the steps");
        d.username = "reporter".to_string();

        // The separating space is there even without an email.
        let body = d.compose_body(&[]);
        assert_eq!(body, "the steps\n\n@reporter \n\n");
    }

    #[test]
    fn test_compose_body_skips_contact_without_username() {
        let mut d = draft("t", "the steps");
        d.email = "reporter@example.com".to_string();

        let body = d.compose_body(&[]);
        assert_eq!(body, "the steps\n\n");
    }

    #[test]
    fn test_compose_body_appends_log_lines() {
        let log = vec!["12:00 started".to_string(), "12:01 crashed".to_string()];
        let body = draft("t", "the steps").compose_body(&log);
        assert_eq!(body, "the steps\n\n12:00 started\n12:01 crashed\n");
    }

    #[test]
    fn test_to_issue_carries_title_and_label() {
        let issue = draft("Crash on open", "steps").to_issue(&[]);
        assert_eq!(issue.title, "Crash on open");
        assert_eq!(issue.body, "steps\n\n");
        assert_eq!(issue.labels, vec!["AutoBugReport".to_string()]);
    }

    #[test]
    fn test_read_log_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "line one\nline two\n").unwrap();

        let lines = read_log_lines(&path);
        assert_eq!(lines, vec!["line one".to_string(), "line two".to_string()]);
    }

    #[test]
    fn test_read_log_lines_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_log_lines(&dir.path().join("nope.log")).is_empty());
    }
}
