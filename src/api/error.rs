//! Failures from the GitHub issues client.

use reqwest::StatusCode;
use thiserror::Error;

/// What went wrong while talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The stored reporter token was rejected.
    #[error("Authentication failed: the reporter token was rejected by GitHub")]
    Unauthorized,

    /// The token cannot open issues on the target repository.
    #[error("Permission denied: the reporter token cannot open issues on this repository")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: please wait before submitting another report")]
    RateLimited,

    /// GitHub refused the issue payload itself.
    #[error("GitHub rejected the report: {0}")]
    Unprocessable(String),

    #[error("GitHub server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Secure storage failed while reading or writing the token.
    #[error("Keyring error: {0}")]
    Keyring(String),
}

/// Result alias for the api module.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Map a non-success HTTP status onto a variant. `context` names
    /// what was being asked for and rides along where the variant can
    /// carry it.
    pub fn from_status(status: StatusCode, context: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(context.to_string()),
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Unprocessable(context.to_string()),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            s if s.is_server_error() => ApiError::ServerError(format!("HTTP {}: {}", s, context)),
            s => ApiError::ServerError(format!("Unexpected HTTP {}: {}", s, context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_map_to_their_variants() {
        let cases = [
            (StatusCode::UNAUTHORIZED, "Authentication failed"),
            (StatusCode::FORBIDDEN, "Permission denied"),
            (StatusCode::TOO_MANY_REQUESTS, "Rate limited"),
        ];
        for (status, prefix) in cases {
            let err = ApiError::from_status(status, "ctx");
            assert!(
                err.to_string().starts_with(prefix),
                "{} should map to '{}', got '{}'",
                status,
                prefix,
                err
            );
        }
    }

    #[test]
    fn test_not_found_carries_the_context() {
        match ApiError::from_status(StatusCode::NOT_FOUND, "repos/acme/widget") {
            ApiError::NotFound(what) => assert_eq!(what, "repos/acme/widget"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unprocessable_carries_the_context() {
        match ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "title is missing") {
            ApiError::Unprocessable(what) => assert_eq!(what, "title is missing"),
            other => panic!("expected Unprocessable, got {:?}", other),
        }
    }

    #[test]
    fn test_five_hundreds_become_server_errors() {
        for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::BAD_GATEWAY] {
            let err = ApiError::from_status(status, "ctx");
            assert!(matches!(err, ApiError::ServerError(_)));
        }
    }

    #[test]
    fn test_unexpected_status_is_labeled_as_such() {
        let err = ApiError::from_status(StatusCode::IM_A_TEAPOT, "ctx");
        match err {
            ApiError::ServerError(what) => assert!(what.starts_with("Unexpected HTTP 418")),
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[test]
    fn test_display_spells_out_the_failure() {
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Authentication failed: the reporter token was rejected by GitHub"
        );
        assert_eq!(
            ApiError::NotFound("acme/widget".to_string()).to_string(),
            "Not found: acme/widget"
        );
    }
}
