//! Background submission tasks.
//!
//! Network work never runs on the render loop. The app hands a draft
//! to [`TaskSpawner`], a tokio task composes the issue and makes the
//! HTTP call, and the outcome comes back as an [`ApiMessage`] on an
//! unbounded channel the main loop drains with `try_recv`.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::api::{GithubClient, NewIssue, ReportTarget};
use crate::report::{self, ReportDraft};

/// What a finished background task has to say.
#[derive(Debug)]
pub enum ApiMessage {
    /// A report submission finished.
    ///
    /// Carries the composed issue payload (needed for the diagnostic
    /// dump on failure) and the raw response body, which is empty when
    /// no token was stored or the request never went out.
    ReportSubmitted { issue: NewIssue, raw: String },
}

/// Hands submissions off to tokio tasks. Cheap to clone; all clones
/// feed the same channel.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Compose and submit a bug report off the render loop.
    ///
    /// The log file is read inside the task so a large log never
    /// stalls rendering.
    pub fn spawn_submit_report(
        &self,
        client: &GithubClient,
        target: ReportTarget,
        draft: ReportDraft,
        log_path: Option<PathBuf>,
    ) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let log_lines = match &log_path {
                Some(path) => report::read_log_lines(path),
                None => Vec::new(),
            };
            let issue = draft.to_issue(&log_lines);
            let raw = client.submit_report(&target, &issue).await;
            let _ = tx.send(ApiMessage::ReportSubmitted { issue, raw });
        });
    }
}

/// Wire up the channel between the main loop and background tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
