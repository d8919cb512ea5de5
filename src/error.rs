//! Application-level errors.
//!
//! Everything that can fail funnels into [`AppError`]. The type knows
//! how to phrase itself for the UI and whether a failure warrants a
//! blocking dialog or just a toast.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Top-level error for the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    /// Terminal or file system failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No repository is configured to receive reports.
    #[error("no repository configured")]
    NoRepository,
}

impl AppError {
    /// Phrase the error for display in the UI, without technical
    /// detail. The full error stays available through `Display` for
    /// the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::NoConfigDir) => {
                "Could not find the configuration directory. Please check your system settings."
                    .to_string()
            }
            AppError::Config(ConfigError::Io(_)) => {
                "Could not read the configuration file. Please check the file exists and is readable."
                    .to_string()
            }
            AppError::Config(ConfigError::Parse(_)) => {
                "The configuration file is invalid. Please check the file format.".to_string()
            }
            AppError::Api(ApiError::Unauthorized) => {
                "Authentication failed. Please check your reporter token.".to_string()
            }
            AppError::Api(ApiError::Forbidden) => {
                "Access denied. The reporter token cannot open issues on this repository."
                    .to_string()
            }
            AppError::Api(ApiError::NotFound(resource)) => {
                format!("'{}' was not found.", resource)
            }
            AppError::Api(ApiError::RateLimited) => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            AppError::Api(ApiError::Unprocessable(msg)) => {
                format!("GitHub rejected the report: {}", msg)
            }
            AppError::Api(ApiError::ServerError(_)) => {
                "GitHub server error. Please try again later.".to_string()
            }
            AppError::Api(ApiError::Network(_)) => {
                "Connection failed. Please check your internet connection.".to_string()
            }
            AppError::Api(ApiError::Keyring(_)) => {
                "Could not access secure storage for the reporter token.".to_string()
            }
            AppError::Io(_) => {
                "A file operation failed. Please check file permissions.".to_string()
            }
            AppError::NoRepository => {
                "No repository is configured to receive bug reports.".to_string()
            }
        }
    }

    /// Whether the failure should interrupt the user with a dialog.
    /// Credential and configuration problems do; transient ones show
    /// up as toasts instead.
    pub fn is_critical(&self) -> bool {
        match self {
            AppError::Config(_) | AppError::NoRepository => true,
            AppError::Api(e) => matches!(
                e,
                ApiError::Unauthorized | ApiError::Forbidden | ApiError::Keyring(_)
            ),
            _ => false,
        }
    }

    /// A next step worth printing alongside the message, when one
    /// exists.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(_) => {
                Some("Check the config file (bugship/config.toml in your config directory).")
            }
            AppError::NoRepository => {
                Some("Pass --repo OWNER/NAME or set owner and repo in the config file.")
            }
            AppError::Api(ApiError::Unauthorized) | AppError::Api(ApiError::Keyring(_)) => {
                Some("Provision a reporter token with 'bugship token set'.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a few seconds and submit again."),
            AppError::Api(ApiError::Network(_)) => Some("Check your internet connection."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_convert_into_app_error() {
        let from_config: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(
            from_config,
            AppError::Config(ConfigError::NoConfigDir)
        ));

        let from_api: AppError = ApiError::Unauthorized.into();
        assert!(matches!(from_api, AppError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn test_user_message_mentions_the_token_when_unauthorized() {
        let msg = AppError::Api(ApiError::Unauthorized).user_message();
        assert!(msg.contains("Authentication failed"));
        assert!(msg.contains("reporter token"));
    }

    #[test]
    fn test_user_message_names_the_missing_resource() {
        let msg = AppError::Api(ApiError::NotFound("acme/widget".to_string())).user_message();
        assert!(msg.contains("acme/widget"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_for_missing_repository() {
        assert!(AppError::NoRepository.user_message().contains("No repository"));
    }

    #[test]
    fn test_credential_and_config_failures_are_critical() {
        assert!(AppError::Api(ApiError::Unauthorized).is_critical());
        assert!(AppError::Api(ApiError::Forbidden).is_critical());
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::NoRepository.is_critical());
    }

    #[test]
    fn test_transient_failures_are_not_critical() {
        assert!(!AppError::Api(ApiError::RateLimited).is_critical());
        assert!(!AppError::Api(ApiError::ServerError("boom".to_string())).is_critical());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(!AppError::Io(io).is_critical());
    }

    #[test]
    fn test_suggested_action_points_at_repo_flag() {
        let action = AppError::NoRepository.suggested_action().unwrap();
        assert!(action.contains("--repo"));
    }

    #[test]
    fn test_suggested_action_points_at_token_subcommand() {
        let action = AppError::Api(ApiError::Unauthorized)
            .suggested_action()
            .unwrap();
        assert!(action.contains("token set"));
    }

    #[test]
    fn test_server_errors_have_no_suggested_action() {
        let err = AppError::Api(ApiError::ServerError("boom".to_string()));
        assert!(err.suggested_action().is_none());
    }
}
