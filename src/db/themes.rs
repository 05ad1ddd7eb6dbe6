use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tracing::{debug, info};

use super::connection::{ensure_schema, open_connection, NOT_DELETED};
use super::reorder::{move_theme, Direction};
use crate::error::{Result, ResultExt, ThemeError};
use crate::models::{FilterOptions, MediaTheme, Page, SortOrder};

/// Column list shared across queries so row mapping stays in one place.
const COLUMNS: &str = "Id, Active, IsDeleted, Created, CreatedBy, Name, DisplayOrder";

/// Everything the admin screens and export need from theme storage.
///
/// Misses are reported as `false`/`None`. `move_up` and `move_down` never
/// return an error: a failed swap is rolled back and reported as `false`.
pub trait MediaThemeRepository {
    /// Insert a theme at the end of the display order and return it with its
    /// generated id, creation time and rank filled in.
    fn add(&self, theme: MediaTheme) -> Result<MediaTheme>;

    /// Every live theme in display order.
    fn get_all(&self) -> Result<Vec<MediaTheme>>;

    /// Look up one live theme. Unknown and soft-deleted ids both come back
    /// as `None` so callers can treat them alike.
    fn get_by_id(&self, id: i64) -> Result<Option<MediaTheme>>;

    /// Persist `active` and `name` for a live theme.
    fn update(&self, theme: &MediaTheme) -> Result<bool>;

    /// Soft-delete. Returns `false` when the id is unknown or already deleted.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Flip the visibility flag of a live theme. A missing flag counts as
    /// active, so the first toggle hides it. Returns `false` on a miss.
    fn toggle_active(&self, id: i64) -> Result<bool>;

    /// Filter by a name substring, sort, and cut out one zero-based page.
    fn get_page(
        &self,
        page_index: usize,
        page_size: usize,
        search_query: &str,
        sort_order: SortOrder,
    ) -> Result<Page<MediaTheme>>;

    /// Same filter as [`get_page`](Self::get_page), always in display order.
    fn get_filtered(&self, options: &FilterOptions) -> Result<Page<MediaTheme>>;

    /// Swap ranks with the nearest live theme above. `false` when the theme
    /// is missing, already first, or the swap could not be committed.
    fn move_up(&self, id: i64) -> bool;

    /// Swap ranks with the nearest live theme below. Mirror of
    /// [`move_up`](Self::move_up).
    fn move_down(&self, id: i64) -> bool;
}

/// SQLite-backed repository. Only the file path is kept; each call opens and
/// drops its own connection.
#[derive(Debug, Clone)]
pub struct SqliteThemeRepository {
    path: PathBuf,
}

impl SqliteThemeRepository {
    /// Prepare the database file and schema, then hand back a repository
    /// pointing at it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_schema(&path)?;
        debug!(path = %path.display(), "theme store ready");
        Ok(Self { path })
    }

    /// Database file every call connects to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        open_connection(&self.path)
    }
}

impl MediaThemeRepository for SqliteThemeRepository {
    fn add(&self, mut theme: MediaTheme) -> Result<MediaTheme> {
        theme.validate()?;

        let mut conn = self.connect()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .persist("failed to start insert transaction")?;

        let highest: i64 = tx
            .query_row(
                &format!("SELECT COALESCE(MAX(DisplayOrder), 0) FROM MediaThemes WHERE {NOT_DELETED}"),
                [],
                |row| row.get(0),
            )
            .persist("failed to read highest display order")?;

        theme.active = Some(theme.is_active());
        theme.is_deleted = false;
        theme.created = Utc::now();
        theme.display_order = highest
            .checked_add(1)
            .ok_or(ThemeError::OrderOverflow(highest))?;

        let id: Option<i64> = tx
            .query_row(
                "INSERT INTO MediaThemes (Active, IsDeleted, Created, CreatedBy, Name, DisplayOrder)
                 VALUES (?1, 0, ?2, ?3, ?4, ?5)
                 RETURNING Id",
                params![
                    theme.active,
                    theme.created,
                    theme.created_by,
                    theme.name,
                    theme.display_order
                ],
                |row| row.get(0),
            )
            .optional()
            .persist("failed to insert theme")?;

        theme.id = id.ok_or(ThemeError::NoIdentity)?;
        tx.commit().persist("failed to commit theme insert")?;

        info!(id = theme.id, display_order = theme.display_order, "theme added");
        Ok(theme)
    }

    fn get_all(&self) -> Result<Vec<MediaTheme>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM MediaThemes WHERE {NOT_DELETED}
                 ORDER BY DisplayOrder, Id"
            ))
            .persist("failed to prepare theme query")?;

        let themes = stmt
            .query_map([], theme_from_row)
            .persist("failed to load themes")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .persist("failed to collect themes")?;

        debug!(count = themes.len(), "loaded all themes");
        Ok(themes)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<MediaTheme>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM MediaThemes WHERE Id = ?1 AND {NOT_DELETED}"),
            [id],
            theme_from_row,
        )
        .optional()
        .persist("failed to load theme")
    }

    fn update(&self, theme: &MediaTheme) -> Result<bool> {
        theme.validate()?;

        let conn = self.connect()?;
        let updated = conn
            .execute(
                &format!(
                    "UPDATE MediaThemes SET Active = ?1, Name = ?2
                     WHERE Id = ?3 AND {NOT_DELETED}"
                ),
                params![theme.is_active(), theme.name, theme.id],
            )
            .persist("failed to update theme")?;

        debug!(id = theme.id, updated, "theme update");
        Ok(updated > 0)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let deleted = conn
            .execute(
                &format!("UPDATE MediaThemes SET IsDeleted = 1 WHERE Id = ?1 AND {NOT_DELETED}"),
                [id],
            )
            .persist("failed to delete theme")?;

        if deleted > 0 {
            info!(id, "theme soft-deleted");
        }
        Ok(deleted > 0)
    }

    fn toggle_active(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let toggled = conn
            .execute(
                &format!(
                    "UPDATE MediaThemes
                     SET Active = CASE WHEN COALESCE(Active, 1) = 1 THEN 0 ELSE 1 END
                     WHERE Id = ?1 AND {NOT_DELETED}"
                ),
                [id],
            )
            .persist("failed to toggle theme")?;

        debug!(id, toggled, "theme active flag toggled");
        Ok(toggled > 0)
    }

    fn get_page(
        &self,
        page_index: usize,
        page_size: usize,
        search_query: &str,
        sort_order: SortOrder,
    ) -> Result<Page<MediaTheme>> {
        let conn = self.connect()?;
        query_page(&conn, page_index, page_size, search_query, sort_order)
    }

    fn get_filtered(&self, options: &FilterOptions) -> Result<Page<MediaTheme>> {
        let conn = self.connect()?;
        query_page(
            &conn,
            options.page_index,
            options.page_size,
            &options.search_query,
            SortOrder::DisplayOrder,
        )
    }

    fn move_up(&self, id: i64) -> bool {
        move_theme(&self.path, id, Direction::Up)
    }

    fn move_down(&self, id: i64) -> bool {
        move_theme(&self.path, id, Direction::Down)
    }
}

/// Count the matches, then fetch one slice of them. An empty query matches
/// every live row; otherwise the match is a case-sensitive substring test.
fn query_page(
    conn: &Connection,
    page_index: usize,
    page_size: usize,
    search_query: &str,
    sort_order: SortOrder,
) -> Result<Page<MediaTheme>> {
    let filter = format!("{NOT_DELETED} AND (?1 = '' OR instr(Name, ?1) > 0)");

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM MediaThemes WHERE {filter}"),
            [search_query],
            |row| row.get(0),
        )
        .persist("failed to count themes")?;

    let limit = i64::try_from(page_size).unwrap_or(i64::MAX);
    let offset = i64::try_from(page_index.saturating_mul(page_size)).unwrap_or(i64::MAX);

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM MediaThemes WHERE {filter}
             ORDER BY {}
             LIMIT ?2 OFFSET ?3",
            sort_order.order_by_clause()
        ))
        .persist("failed to prepare page query")?;

    let items = stmt
        .query_map(params![search_query, limit, offset], theme_from_row)
        .persist("failed to load theme page")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .persist("failed to collect theme page")?;

    debug!(
        page_index,
        page_size,
        sort = %sort_order,
        total,
        returned = items.len(),
        "theme page loaded"
    );

    Ok(Page {
        items,
        total_count: usize::try_from(total).unwrap_or_default(),
    })
}

fn theme_from_row(row: &Row<'_>) -> rusqlite::Result<MediaTheme> {
    Ok(MediaTheme {
        id: row.get(0)?,
        active: row.get(1)?,
        is_deleted: row.get(2)?,
        created: row.get(3)?,
        created_by: row.get(4)?,
        name: row.get(5)?,
        display_order: row.get(6)?,
    })
}
