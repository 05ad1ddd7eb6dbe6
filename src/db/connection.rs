use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::{Result, ResultExt, ThemeError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".media-theme-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "media_themes.sqlite";

/// Predicate every read, count and neighbour search must carry.
pub(crate) const NOT_DELETED: &str = "IsDeleted = 0";

/// Open a connection to the database file. Each repository call owns the
/// returned handle for its own duration only.
pub fn open_connection(path: &Path) -> Result<Connection> {
    Connection::open(path).persist("failed to open SQLite database")
}

/// Create the data directory and the `MediaThemes` table if they are missing.
/// Safe to run on every start.
pub fn ensure_schema(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = open_connection(path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS MediaThemes (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Active INTEGER NULL DEFAULT 1,
            IsDeleted INTEGER NOT NULL DEFAULT 0,
            Created TEXT NOT NULL,
            CreatedBy TEXT NULL,
            Name TEXT NOT NULL,
            DisplayOrder INTEGER NOT NULL
        )",
        [],
    )
    .persist("failed to create MediaThemes table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS IX_MediaThemes_DisplayOrder
            ON MediaThemes (IsDeleted, DisplayOrder)",
        [],
    )
    .persist("failed to create display order index")?;

    Ok(())
}

/// Resolve the default database location inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| ThemeError::Config("could not locate home directory".into()))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("themes.sqlite");

        ensure_schema(&path).unwrap();
        ensure_schema(&path).unwrap();

        let conn = open_connection(&path).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'MediaThemes'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn default_path_ends_with_database_file() {
        if let Ok(path) = default_db_path() {
            assert!(path.ends_with(Path::new(DATA_DIR_NAME).join(DB_FILE_NAME)));
        }
    }
}
