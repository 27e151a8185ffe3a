//! Report configuration, read from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid.

use crate::error::ReportError;
use docana_kernel::{DEFAULT_MAX_ENTRIES, DEFAULT_MAX_LINES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_KEY_WIDTH: usize = 24;
pub const SNDATA_ROOT_VAR: &str = "SNDATA_ROOT";
pub const SNANA_DIR_VAR: &str = "SNANA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default, deny_unknown_fields)]
pub struct ReportConfig {
    pub max_registry_entries: usize,
    pub max_document_lines: usize,
    pub key_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sndata_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snana_dir: Option<String>,
    pub snana_version: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_registry_entries: DEFAULT_MAX_ENTRIES,
            max_document_lines: DEFAULT_MAX_LINES,
            key_width: DEFAULT_KEY_WIDTH,
            sndata_root: None,
            snana_dir: None,
            snana_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ReportConfig {
    /// Parse `text`; `origin` only labels errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ReportError> {
        toml::from_str(text).map_err(|error| ReportError::InvalidToml {
            path: origin.to_string(),
            message: error.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ReportError::io(path.display(), e))?;
        let config = Self::from_toml_str(&text, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded report config");
        Ok(config)
    }

    /// Fill installation paths the file left unset from `lookup`
    /// (normally the process environment).
    pub fn with_path_fallbacks(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.sndata_root.is_none() {
            self.sndata_root = lookup(SNDATA_ROOT_VAR).filter(|v| !v.is_empty());
        }
        if self.snana_dir.is_none() {
            self.snana_dir = lookup(SNANA_DIR_VAR).filter(|v| !v.is_empty());
        }
        self
    }

    pub fn with_env_fallbacks(self) -> Self {
        self.with_path_fallbacks(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ReportConfig::from_toml_str("", "inline").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.key_width, 24);
        assert_eq!(config.max_document_lines, 1000);
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config = ReportConfig::from_toml_str(
            "key_width = 20\nsndata_root = \"/data/sndata\"\n",
            "inline",
        )
        .unwrap();
        assert_eq!(config.key_width, 20);
        assert_eq!(config.sndata_root.as_deref(), Some("/data/sndata"));
        assert_eq!(config.max_registry_entries, DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn unknown_field_is_rejected_with_origin() {
        let err = ReportConfig::from_toml_str("colour = 3\n", "report.toml").unwrap_err();
        assert!(
            matches!(&err, ReportError::InvalidToml { path, .. } if path == "report.toml"),
            "{err}"
        );
    }

    #[test]
    fn fallbacks_fill_only_unset_paths() {
        let config = ReportConfig {
            snana_dir: Some("/opt/snana".to_string()),
            ..ReportConfig::default()
        }
        .with_path_fallbacks(|name| match name {
            SNDATA_ROOT_VAR => Some("/env/sndata".to_string()),
            SNANA_DIR_VAR => Some("/env/snana".to_string()),
            _ => None,
        });
        assert_eq!(config.sndata_root.as_deref(), Some("/env/sndata"));
        assert_eq!(config.snana_dir.as_deref(), Some("/opt/snana"));
    }
}
