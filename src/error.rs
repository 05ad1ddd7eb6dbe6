//! Error taxonomy shared by the repository layer.
//!
//! Misses (unknown id, already deleted, no neighbour to swap with) are not
//! errors: they surface as `false` or `None`. Only validation failures and
//! storage problems end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    /// The record was rejected before touching the database.
    #[error("validation failed: {0}")]
    Validation(String),

    /// SQLite reported a failure while running the named step.
    #[error("{context}: {source}")]
    Persistence {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The insert statement completed without handing back a row id.
    #[error("insert into MediaThemes returned no identity")]
    NoIdentity,

    /// The highest live display order is already `i64::MAX`, so there is no
    /// rank left to append at.
    #[error("display order {0} has no successor")]
    OrderOverflow(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ThemeError {
    /// True for failures that come from the store rather than the input.
    /// The binary uses this to tell the operator a rerun may succeed.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Persistence { .. } | Self::NoIdentity | Self::OrderOverflow(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;

/// Attach a short description of the failing step to a rusqlite error, the
/// same way `anyhow::Context` reads at call sites.
pub trait ResultExt<T> {
    fn persist(self, context: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn persist(self, context: &'static str) -> Result<T> {
        self.map_err(|source| ThemeError::Persistence { context, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_wraps_sqlite_errors_with_context() {
        let raw: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = raw.persist("failed to load theme").unwrap_err();

        assert!(err.is_persistence());
        assert!(err.to_string().starts_with("failed to load theme: "));
    }

    #[test]
    fn validation_is_not_a_persistence_failure() {
        let err = ThemeError::Validation("Name is required.".into());
        assert!(!err.is_persistence());
        assert!(ThemeError::NoIdentity.is_persistence());
        assert!(ThemeError::OrderOverflow(i64::MAX).is_persistence());
    }
}
