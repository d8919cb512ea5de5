//! Reporter token storage.
//!
//! Bug reports are filed with a shared reporter identity rather than
//! the user's own GitHub credentials. The token is provisioned once
//! (via the `token` CLI subcommand) and kept in the OS keyring under a
//! fixed key; the submission path only ever reads it.

use tracing::{debug, warn};

use super::error::{ApiError, Result};

/// Keyring service name.
const KEYRING_SERVICE: &str = "bugship";

/// Keyring user under which the reporter token lives.
const TOKEN_KEY: &str = "tester_id";

/// `Authorization` header value for a reporter token. GitHub's token
/// scheme is a plain prefix, no encoding involved.
pub fn auth_header_value(token: &str) -> String {
    format!("token {}", token)
}

fn entry() -> Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, TOKEN_KEY)
        .map_err(|e| ApiError::Keyring(format!("keyring unavailable: {}", e)))
}

/// Put the reporter token into the OS keyring.
pub fn store_token(token: &str) -> Result<()> {
    entry()?
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("could not store the token: {}", e)))
}

/// Read the reporter token, erroring when none is stored.
pub fn get_token() -> Result<String> {
    entry()?
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("could not read the token: {}", e)))
}

/// Remove the reporter token from the OS keyring.
pub fn delete_token() -> Result<()> {
    entry()?
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("could not delete the token: {}", e)))
}

/// Whether a reporter token is currently stored.
pub fn has_token() -> bool {
    get_token().is_ok()
}

/// Load the reporter token, treating absence as a non-event.
///
/// Submission silently does nothing (no token, no request) when
/// nothing is stored, so this returns `None` both for a missing entry
/// and for keyring failures; the latter are logged.
pub fn load_token() -> Option<String> {
    let entry = match entry() {
        Ok(entry) => entry,
        Err(e) => {
            warn!(error = %e, "Could not access keyring");
            return None;
        }
    };

    match entry.get_password() {
        Ok(token) => Some(token),
        Err(keyring::Error::NoEntry) => {
            debug!("No reporter token stored");
            None
        }
        Err(e) => {
            warn!(error = %e, "Could not read reporter token from keyring");
            None
        }
    }
}
