//! Host, user, and installation metadata shown in the report overview.

use crate::config::{ReportConfig, SNANA_DIR_VAR, SNDATA_ROOT_VAR};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunEnvironment {
    pub host: Option<String>,
    pub user: Option<String>,
    pub cwd: Option<PathBuf>,
    pub sndata_root: Option<String>,
    pub snana_dir: Option<String>,
    pub version: String,
}

impl RunEnvironment {
    /// Read the process environment. Installation paths come from `config`,
    /// which already carries any environment fallbacks.
    pub fn capture(config: &ReportConfig) -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            host: var("HOSTNAME").or_else(|| var("HOST")),
            user: var("USER").or_else(|| var("USERNAME")),
            cwd: std::env::current_dir().ok(),
            sndata_root: config.sndata_root.clone(),
            snana_dir: config.snana_dir.clone(),
            version: config.snana_version.clone(),
        }
    }

    /// Replace a leading installation path with its variable name, so
    /// `/data/sndata/simlib/X` displays as `$SNDATA_ROOT/simlib/X`.
    pub fn restore_env_path(&self, path: &str) -> String {
        for (name, prefix) in self.install_prefixes() {
            if let Some(rest) = path.strip_prefix(prefix)
                && (rest.is_empty() || rest.starts_with('/'))
            {
                return format!("${name}{rest}");
            }
        }
        path.to_string()
    }

    /// Inverse of [`Self::restore_env_path`] for a leading `$VAR`.
    pub fn expand_env_path(&self, path: &str) -> String {
        for (name, prefix) in self.install_prefixes() {
            if let Some(rest) = path.strip_prefix('$').and_then(|p| p.strip_prefix(name))
                && (rest.is_empty() || rest.starts_with('/'))
            {
                return format!("{prefix}{rest}");
            }
        }
        path.to_string()
    }

    fn install_prefixes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (SNDATA_ROOT_VAR, self.sndata_root.as_deref()),
            (SNANA_DIR_VAR, self.snana_dir.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, prefix)| {
            prefix
                .map(|p| p.trim_end_matches('/'))
                .filter(|p| !p.is_empty())
                .map(|p| (name, p))
        })
    }
}
