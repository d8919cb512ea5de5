//! bugship - file a bug report from the terminal.
//!
//! Presents a short form (title, steps to reproduce, optional contact
//! details), attaches the tail of the application log, and files the
//! report as a GitHub issue on the configured repository.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod report;
mod tasks;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::api::{GithubClient, ReportTarget};
use crate::app::App;
use crate::config::Settings;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::{create_task_channel, ApiMessage};

#[derive(Debug, Parser)]
#[command(name = "bugship", version, about = "File a bug report from the terminal")]
struct Cli {
    /// Repository that receives the report, e.g. octocat/hello-world.
    #[arg(long, value_name = "OWNER/NAME", value_parser = parse_repo_slug)]
    repo: Option<ReportTarget>,

    /// Log file to attach to the report instead of the newest bugship log.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the stored reporter token.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    /// Read a token from stdin and store it in the system keyring.
    Set,
    /// Remove the stored token.
    Clear,
    /// Show whether a token is stored.
    Status,
}

fn parse_repo_slug(value: &str) -> Result<ReportTarget, String> {
    ReportTarget::parse(value)
        .ok_or_else(|| format!("'{}' is not an OWNER/NAME repository slug", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let result = match cli.command {
        Some(Command::Token { action }) => run_token_command(action),
        None => run_report_form(cli).await,
    };

    logging::shutdown();
    result
}

/// Handle the `token` subcommand outside the TUI.
fn run_token_command(action: TokenAction) -> anyhow::Result<()> {
    match action {
        TokenAction::Set => {
            print!("Paste the reporter token: ");
            io::stdout().flush()?;
            let mut token = String::new();
            io::stdin().read_line(&mut token)?;
            let token = token.trim();
            if token.is_empty() {
                anyhow::bail!("no token entered");
            }
            api::store_token(token)?;
            println!("Token stored.");
        }
        TokenAction::Clear => {
            api::delete_token()?;
            println!("Token cleared.");
        }
        TokenAction::Status => {
            if api::has_token() {
                println!("A reporter token is stored.");
            } else {
                println!("No reporter token is stored.");
            }
        }
    }
    Ok(())
}

/// Log the error, print a readable message, and exit.
fn fail_startup(err: AppError) -> ! {
    error!(error = %err, "Startup failed");
    eprintln!("bugship: {}", err.user_message());
    if let Some(action) = err.suggested_action() {
        eprintln!("{}", action);
    }
    logging::shutdown();
    process::exit(1);
}

/// Run the interactive report form.
async fn run_report_form(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load().unwrap_or_else(|e| fail_startup(AppError::from(e)));

    let target = cli
        .repo
        .clone()
        .or_else(|| settings.target())
        .unwrap_or_else(|| fail_startup(AppError::NoRepository));

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| settings.log_file.clone())
        .or_else(logging::latest_log_file);
    match &log_path {
        Some(path) => debug!(path = %path.display(), "Report will attach this log file"),
        None => debug!("No log file found to attach"),
    }

    let client = GithubClient::new().unwrap_or_else(|e| fail_startup(AppError::Api(e)));
    let (mut rx, spawner) = create_task_channel();
    let mut app = App::new(&settings, target, log_path, client, spawner);

    info!("Starting bugship");

    let mut terminal = setup_terminal()?;
    let events = EventHandler::new();
    let result = run_loop(&mut terminal, &mut app, &mut rx, &events);
    restore_terminal(&mut terminal)?;
    result?;

    if let Some(url) = app.filed_url() {
        println!("Bug report filed: {}", url);
    }
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Drive the application until it asks to quit.
///
/// Each iteration draws a frame, drains finished background tasks, and
/// then blocks on the next terminal event or tick.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<ApiMessage>,
    events: &EventHandler,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;

        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }

        app.update(events.next()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repo_flag() {
        let cli = Cli::parse_from(["bugship", "--repo", "octocat/hello-world"]);
        assert_eq!(cli.repo, Some(ReportTarget::new("octocat", "hello-world")));
    }

    #[test]
    fn test_parse_rejects_bad_slug() {
        let result = Cli::try_parse_from(["bugship", "--repo", "nodash"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_log_file_flag() {
        let cli = Cli::parse_from(["bugship", "--log-file", "/tmp/session.log"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/session.log")));
    }

    #[test]
    fn test_parse_token_subcommand() {
        let cli = Cli::parse_from(["bugship", "token", "status"]);
        assert!(matches!(
            cli.command,
            Some(Command::Token {
                action: TokenAction::Status
            })
        ));
    }
}
