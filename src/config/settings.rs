//! The bugship settings file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ReportTarget;

use super::{config_file_path, Result};

/// Application-wide settings.
///
/// Every field has a default, so a partial (or absent) config file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Owner of the repository that receives filed reports.
    pub owner: String,
    /// Name of the repository that receives filed reports.
    pub repo: String,
    /// Path of the application log attached to each report.
    ///
    /// When unset, the newest file in bugship's own log directory is used.
    pub log_file: Option<PathBuf>,
    /// Reporter GitHub username prefilled into the form.
    pub username: String,
    /// Reporter email prefilled into the form.
    pub email: String,
    /// Project address shown after filing for mailing in extra details.
    pub maintainer_email: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            log_file: None,
            username: String::new(),
            email: String::new(),
            maintainer_email: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from the config file.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse is an error, so a typo never silently discards the config.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path()?)
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let settings = toml::from_str(&raw)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(settings)
    }

    /// The repository reports are filed against, if one is configured.
    pub fn target(&self) -> Option<ReportTarget> {
        if self.owner.is_empty() || self.repo.is_empty() {
            return None;
        }
        Some(ReportTarget::new(&self.owner, &self.repo))
    }
}
