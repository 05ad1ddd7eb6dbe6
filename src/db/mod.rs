//! Persistence module split across logical submodules.

mod connection;
mod reorder;
mod themes;

pub use connection::{default_db_path, ensure_schema, open_connection};
pub use themes::{MediaThemeRepository, SqliteThemeRepository};
