//! Core application state and update loop.
//!
//! The application follows the Elm architecture: events flow into
//! [`App::update`], which mutates state, and [`App::view`] renders the
//! current state each frame. Submissions run on background tasks and
//! report back through [`ApiMessage`]s handled by [`App::handle_message`].

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, error, info, trace, warn};

use crate::api::{extract_html_url, GithubClient, ReportTarget};
use crate::config::Settings;
use crate::error::AppError;
use crate::events::Event;
use crate::tasks::{ApiMessage, TaskSpawner};
use crate::ui::{
    ErrorDialog, NoticeDialog, NotificationManager, ReportFormAction, ReportFormView, ResultAction,
    ResultView,
};

/// Top-level application states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The report form is on screen.
    #[default]
    Form,
    /// A report was filed and its URL is on screen.
    Result,
    /// The application is shutting down.
    Exiting,
}

/// The main application.
pub struct App {
    /// Current state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// The bug report form.
    form: ReportFormView,
    /// The post-submission view.
    result_view: ResultView,
    /// Dialog shown when required input is missing.
    notice_dialog: NoticeDialog,
    /// Dialog shown for errors that need acknowledgment.
    error_dialog: ErrorDialog,
    /// Transient toast notifications.
    notifications: NotificationManager,
    /// Repository that receives filed reports.
    target: ReportTarget,
    /// GitHub API client.
    client: GithubClient,
    /// Background task spawner.
    spawner: TaskSpawner,
    /// Log file attached to each report.
    log_path: Option<PathBuf>,
    /// URL of the filed issue, once one exists.
    filed_url: Option<String>,
}

impl App {
    /// Create a new application.
    pub fn new(
        settings: &Settings,
        target: ReportTarget,
        log_path: Option<PathBuf>,
        client: GithubClient,
        spawner: TaskSpawner,
    ) -> Self {
        let mut form = ReportFormView::new();
        form.prefill_contact(&settings.username, &settings.email);

        let mut result_view = ResultView::new();
        result_view.set_contact(&settings.maintainer_email);

        Self {
            state: AppState::default(),
            should_quit: false,
            form,
            result_view,
            notice_dialog: NoticeDialog::new(),
            error_dialog: ErrorDialog::new(),
            notifications: NotificationManager::new(),
            target,
            client,
            spawner,
            log_path,
            filed_url: None,
        }
    }

    /// Whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// URL of the filed issue, once one exists.
    pub fn filed_url(&self) -> Option<&str> {
        self.filed_url.as_deref()
    }

    /// Handle an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(?key, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    /// Handle a keyboard event.
    fn handle_key_event(&mut self, key: KeyEvent) {
        // Dialogs capture all input until dismissed.
        if self.error_dialog.is_visible() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_dialog.dismiss();
            }
            return;
        }
        if self.notice_dialog.is_visible() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.notice_dialog.dismiss();
            }
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.state {
            AppState::Form => match self.form.handle_input(key) {
                Some(ReportFormAction::Cancel) => {
                    info!("Report cancelled");
                    self.quit();
                }
                Some(ReportFormAction::Submit) => self.submit_report(),
                None => {}
            },
            AppState::Result => match self.result_view.handle_input(key) {
                Some(ResultAction::Open) => self.open_issue_link(),
                Some(ResultAction::Done) => self.quit(),
                None => {}
            },
            AppState::Exiting => {}
        }
    }

    /// Advance animations and expire notifications.
    fn handle_tick(&mut self) {
        self.form.tick();
        self.notifications.tick();
    }

    /// Validate the draft and spawn the submission task.
    fn submit_report(&mut self) {
        let draft = self.form.draft();
        if let Err(e) = draft.validate() {
            debug!(error = ?e, "Report draft failed validation");
            self.notice_dialog.show("Input is required", e.message());
            return;
        }

        info!(repo = %self.target, "Submitting bug report");
        self.form.set_submitting(true);
        self.spawner.spawn_submit_report(
            &self.client,
            self.target.clone(),
            draft,
            self.log_path.clone(),
        );
    }

    /// Handle a message from a background task.
    pub fn handle_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::ReportSubmitted { issue, raw } => {
                self.form.set_submitting(false);
                match extract_html_url(&raw) {
                    Some(url) => {
                        info!(%url, "Bug report filed");
                        self.filed_url = Some(url.clone());
                        self.result_view.set_url(url);
                        self.state = AppState::Result;
                    }
                    None => {
                        error!("Submit Bug Report Error:");
                        error!("title: {}", issue.title);
                        error!("body: {}", issue.body);
                        error!("GitHub response: {}", raw);
                        self.error_dialog.show(
                            "Submit Bug Error",
                            format!(
                                "The bug report could not be submitted. Please try again, \
                                 or create the issue yourself at https://github.com/{}/issues",
                                self.target
                            ),
                        );
                    }
                }
            }
        }
    }

    /// Open the filed issue in the browser.
    fn open_issue_link(&mut self) {
        let url = self.result_view.url().to_string();
        match open::that(&url) {
            Ok(()) => self.notifications.info("Opened the issue in your browser"),
            Err(e) => self.handle_error(&AppError::Io(e)),
        }
    }

    /// Route an error to a dialog or a notification.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            warn!(%error, "Critical error");
            self.error_dialog.show("Error", error.user_message());
        } else {
            debug!(%error, "Error");
            self.notifications.error(error.user_message());
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Render the current state.
    pub fn view(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        match self.state {
            AppState::Form | AppState::Exiting => self.form.render(frame, chunks[1]),
            AppState::Result => self.result_view.render(frame, chunks[1]),
        }
        self.render_footer(frame, chunks[2]);

        // Overlays render last so they sit on top.
        self.notifications.render(frame, frame.area());
        self.notice_dialog.render(frame, frame.area());
        self.error_dialog.render(frame, frame.area());
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Span::styled(
            "bugship",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] =
            if self.error_dialog.is_visible() || self.notice_dialog.is_visible() {
                &[(" Enter ", "Dismiss")]
            } else {
                match self.state {
                    AppState::Form => &[
                        (" Tab ", "Next field"),
                        (" Enter ", "Submit"),
                        (" Esc ", "Cancel"),
                    ],
                    AppState::Result => &[(" Enter ", "Open in browser"), (" Esc ", "Close")],
                    AppState::Exiting => &[],
                }
            };

        let mut spans = Vec::new();
        for (chip, label) in hints {
            spans.push(Span::styled(
                *chip,
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
            spans.push(Span::styled(
                format!(" {}  ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NewIssue;
    use crate::tasks::create_task_channel;

    fn test_app() -> App {
        let (_rx, spawner) = create_task_channel();
        let client = GithubClient::new().unwrap();
        App::new(
            &Settings::default(),
            ReportTarget::new("octocat", "hello-world"),
            None,
            client,
            spawner,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.update(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_initial_state() {
        let app = test_app();
        assert_eq!(app.state(), AppState::Form);
        assert!(!app.should_quit());
        assert_eq!(app.filed_url(), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);
    }

    #[test]
    fn test_esc_cancels_form() {
        let mut app = test_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_empty_submit_shows_notice() {
        let mut app = test_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::BackTab,
            KeyModifiers::SHIFT,
        )));
        press(&mut app, KeyCode::Enter);

        assert!(app.notice_dialog.is_visible());
        assert_eq!(
            app.notice_dialog.message(),
            "Please briefly describe what went wrong."
        );
        assert_eq!(app.state(), AppState::Form);
        assert!(!app.form.is_submitting());
    }

    #[test]
    fn test_missing_steps_shows_notice() {
        let mut app = test_app();
        for c in "Crash on open".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.notice_dialog.is_visible());
        assert_eq!(
            app.notice_dialog.message(),
            "Please describe steps you took before something went wrong."
        );
    }

    #[test]
    fn test_enter_dismisses_notice() {
        let mut app = test_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::BackTab,
            KeyModifiers::SHIFT,
        )));
        press(&mut app, KeyCode::Enter);
        assert!(app.notice_dialog.is_visible());

        press(&mut app, KeyCode::Enter);
        assert!(!app.notice_dialog.is_visible());
        assert_eq!(app.state(), AppState::Form);
    }

    #[tokio::test]
    async fn test_valid_submit_locks_form() {
        let mut app = test_app();
        for c in "Crash on open".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        for c in "Open a file".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.form.is_submitting());

        // Input is ignored while the submission is in flight.
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_submitted_report_with_url_shows_result() {
        let mut app = test_app();
        let issue = NewIssue::auto_report("t".to_string(), "b".to_string());
        let raw = r#"{"html_url": "https://github.com/octocat/hello-world/issues/7"}"#;
        app.handle_message(ApiMessage::ReportSubmitted {
            issue,
            raw: raw.to_string(),
        });

        assert_eq!(app.state(), AppState::Result);
        assert_eq!(
            app.filed_url(),
            Some("https://github.com/octocat/hello-world/issues/7")
        );
        assert_eq!(
            app.result_view.url(),
            "https://github.com/octocat/hello-world/issues/7"
        );
        assert!(!app.form.is_submitting());
    }

    #[test]
    fn test_submitted_report_without_url_shows_error_dialog() {
        let mut app = test_app();
        let issue = NewIssue::auto_report("t".to_string(), "b".to_string());
        app.handle_message(ApiMessage::ReportSubmitted {
            issue,
            raw: r#"{"message": "Bad credentials"}"#.to_string(),
        });

        assert_eq!(app.state(), AppState::Form);
        assert!(app.error_dialog.is_visible());
        assert!(app
            .error_dialog
            .message()
            .contains("https://github.com/octocat/hello-world/issues"));
        assert!(!app.form.is_submitting());
    }

    #[test]
    fn test_empty_response_shows_error_dialog() {
        let mut app = test_app();
        let issue = NewIssue::auto_report("t".to_string(), "b".to_string());
        app.handle_message(ApiMessage::ReportSubmitted {
            issue,
            raw: String::new(),
        });

        assert_eq!(app.state(), AppState::Form);
        assert!(app.error_dialog.is_visible());
    }

    #[test]
    fn test_critical_error_shows_dialog() {
        let mut app = test_app();
        app.handle_error(&AppError::NoRepository);
        assert!(app.error_dialog.is_visible());
    }

    #[test]
    fn test_non_critical_error_shows_notification() {
        let mut app = test_app();
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        app.handle_error(&AppError::Io(io_err));
        assert!(!app.error_dialog.is_visible());
        assert_eq!(app.notifications.len(), 1);
    }

    #[test]
    fn test_dialog_blocks_form_input() {
        let mut app = test_app();
        app.handle_error(&AppError::NoRepository);

        press(&mut app, KeyCode::Char('x'));
        assert!(app.error_dialog.is_visible());
        assert_eq!(app.form.draft().title, "");

        press(&mut app, KeyCode::Esc);
        assert!(!app.error_dialog.is_visible());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_result_esc_quits() {
        let mut app = test_app();
        let issue = NewIssue::auto_report("t".to_string(), "b".to_string());
        app.handle_message(ApiMessage::ReportSubmitted {
            issue,
            raw: r#"{"html_url": "https://github.com/octocat/hello-world/issues/7"}"#.to_string(),
        });
        assert_eq!(app.state(), AppState::Result);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_contact_prefilled_from_settings() {
        let (_rx, spawner) = create_task_channel();
        let client = GithubClient::new().unwrap();
        let settings = Settings {
            username: "octocat".to_string(),
            email: "octo@example.com".to_string(),
            maintainer_email: "maintainers@example.org".to_string(),
            ..Settings::default()
        };
        let app = App::new(
            &settings,
            ReportTarget::new("octocat", "hello-world"),
            None,
            client,
            spawner,
        );

        let draft = app.form.draft();
        assert_eq!(draft.username, "octocat");
        assert_eq!(draft.email, "octo@example.com");
        assert_eq!(app.result_view.contact(), "maintainers@example.org");
    }
}
