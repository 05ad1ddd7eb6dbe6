//! Core library surface for the media theme catalog.
//!
//! The repository in `db` is the whole contract the admin front-end and any
//! export tooling rely on: CRUD with soft delete, paged search, and manual
//! ordering by adjacent swap.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;

pub use config::Config;

/// The storage contract and its SQLite implementation.
pub use db::{MediaThemeRepository, SqliteThemeRepository};

pub use error::{Result, ThemeError};

pub use models::{FilterOptions, MediaTheme, Page, SortOrder};
