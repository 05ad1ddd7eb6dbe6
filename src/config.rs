//! Runtime configuration, read from the environment with command line
//! overrides applied on top.

use std::path::PathBuf;

use crate::db::default_db_path;
use crate::error::{Result, ThemeError};

/// Environment variable naming the SQLite file.
pub const DB_ENV: &str = "MEDIA_THEMES_DB";
/// Environment variable holding the default log filter.
pub const LOG_ENV: &str = "MEDIA_THEMES_LOG";

const DEFAULT_LOG_FILTER: &str = "media_theme_manager=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Split out so tests do not have to
    /// mutate the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_path = match lookup(DB_ENV).filter(|value| !value.trim().is_empty()) {
            Some(value) => PathBuf::from(value.trim()),
            None => default_db_path()?,
        };

        let log_filter = lookup(LOG_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Ok(Self {
            database_path,
            log_filter,
        })
    }

    /// Replace the database location, e.g. from a `--db` flag.
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if path.as_os_str().is_empty() {
                return Err(ThemeError::Config("database path must not be empty".into()));
            }
            self.database_path = path;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_are_trimmed_and_used() {
        let config = Config::from_lookup(|key| match key {
            DB_ENV => Some(" /tmp/themes.sqlite ".into()),
            LOG_ENV => Some("debug".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/themes.sqlite"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn blank_log_filter_falls_back_to_default() {
        let config = Config::from_lookup(|key| match key {
            DB_ENV => Some("themes.sqlite".into()),
            LOG_ENV => Some("  ".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn cli_path_overrides_environment() {
        let config = Config::from_lookup(|key| (key == DB_ENV).then(|| "env.sqlite".into()))
            .unwrap()
            .with_database_path(Some(PathBuf::from("flag.sqlite")))
            .unwrap();

        assert_eq!(config.database_path, PathBuf::from("flag.sqlite"));
    }

    #[test]
    fn empty_cli_path_is_rejected() {
        let config = Config::from_lookup(|key| (key == DB_ENV).then(|| "env.sqlite".into())).unwrap();
        assert!(matches!(
            config.with_database_path(Some(PathBuf::new())),
            Err(ThemeError::Config(_))
        ));
    }
}
