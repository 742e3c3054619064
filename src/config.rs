//! Runtime configuration
//!
//! Read once at startup from `FITFAM_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::remote::DEFAULT_TIMEOUT;

pub const DATABASE_PATH_VAR: &str = "FITFAM_DATABASE_PATH";
pub const REMOTE_TIMEOUT_VAR: &str = "FITFAM_REMOTE_TIMEOUT_SECS";
pub const LOG_VAR: &str = "FITFAM_LOG";

pub const DEFAULT_LOG_DIRECTIVE: &str = "fitfam=info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds greater than zero, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub remote_timeout: Duration,
    pub log_directive: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset or empty variables take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let database_path = get(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let remote_timeout = match get(REMOTE_TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        let log_directive =
            get(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string());

        Ok(Self {
            database_path,
            remote_timeout,
            log_directive,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var: REMOTE_TIMEOUT_VAR,
            value: raw.to_string(),
        }),
    }
}

/// `<project>/data/fitfam.db`, where the project root is found from the executable location
pub fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    project_root(&exe_dir).join("data").join("fitfam.db")
}

/// Go up from target/release or target/debug to the project root
fn project_root(exe_dir: &Path) -> PathBuf {
    if exe_dir.ends_with("release") || exe_dir.ends_with("debug") {
        if let Some(root) = exe_dir.parent().and_then(Path::parent) {
            return root.to_path_buf();
        }
    }
    exe_dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.remote_timeout, Duration::from_secs(15));
        assert_eq!(config.log_directive, "fitfam=info");
        assert!(config.database_path.ends_with("data/fitfam.db"));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            (DATABASE_PATH_VAR, "/tmp/family.db"),
            (REMOTE_TIMEOUT_VAR, " 30 "),
            (LOG_VAR, "fitfam=debug"),
        ])
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/family.db"));
        assert_eq!(config.remote_timeout, Duration::from_secs(30));
        assert_eq!(config.log_directive, "fitfam=debug");
    }

    #[test]
    fn test_bad_timeout() {
        for bad in ["0", "-3", "soon"] {
            assert!(matches!(
                config(&[(REMOTE_TIMEOUT_VAR, bad)]),
                Err(ConfigError::InvalidTimeout { .. })
            ));
        }
        // empty means unset
        assert!(config(&[(REMOTE_TIMEOUT_VAR, "")]).is_ok());
    }

    #[test]
    fn test_project_root_from_target_dir() {
        assert_eq!(
            project_root(Path::new("/work/fitfam/target/release")),
            PathBuf::from("/work/fitfam")
        );
        assert_eq!(
            project_root(Path::new("/usr/local/bin")),
            PathBuf::from("/usr/local/bin")
        );
    }
}
