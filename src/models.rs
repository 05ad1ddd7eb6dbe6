//! Domain models that mirror the `MediaThemes` table and the paging types the
//! repository hands back. These stay plain data holders; the persistence
//! rules live in `db`.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{Result, ThemeError};

/// Longest name the store accepts, counted in characters.
pub const NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq)]
/// One theme row. A freshly built value has `id == 0`; the repository fills in
/// the id, timestamp and display order on insert.
pub struct MediaTheme {
    pub id: i64,
    /// Visibility flag. `None` is read as active.
    pub active: Option<bool>,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub created_by: Option<String>,
    pub name: String,
    /// Manual rank. Lower values sort first.
    pub display_order: i64,
}

impl MediaTheme {
    /// Start a new, unsaved theme with the given label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            active: Some(true),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Record who created the theme.
    pub fn with_created_by(mut self, author: impl Into<String>) -> Self {
        self.created_by = Some(author.into());
        self
    }

    /// Visibility with the missing-flag default applied.
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// Reject blank or overlong names before anything reaches SQLite.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ThemeError::Validation("Name is required.".into()));
        }
        if self.name.chars().count() > NAME_MAX_CHARS {
            return Err(ThemeError::Validation(format!(
                "Name cannot exceed {NAME_MAX_CHARS} characters."
            )));
        }
        Ok(())
    }
}

impl fmt::Display for MediaTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Ordering applied by [`crate::MediaThemeRepository::get_page`].
pub enum SortOrder {
    Name,
    NameDesc,
    #[default]
    DisplayOrder,
}

impl SortOrder {
    /// Parse the tokens the admin screens send. Unknown or empty tokens fall
    /// back to display order rather than failing.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "Name" => Self::Name,
            "NameDesc" => Self::NameDesc,
            _ => Self::DisplayOrder,
        }
    }

    /// Token understood by [`from_token`](Self::from_token).
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::NameDesc => "NameDesc",
            Self::DisplayOrder => "DisplayOrder",
        }
    }

    /// Next state of the "sort by name" toggle: display order, then name
    /// ascending, then name descending, then back. The CLI's `page --next-sort`
    /// flag steps through the orders this way.
    pub fn cycle(self) -> Self {
        match self {
            Self::DisplayOrder => Self::Name,
            Self::Name => Self::NameDesc,
            Self::NameDesc => Self::DisplayOrder,
        }
    }

    pub(crate) fn order_by_clause(self) -> &'static str {
        match self {
            Self::Name => "Name ASC, Id ASC",
            Self::NameDesc => "Name DESC, Id DESC",
            Self::DisplayOrder => "DisplayOrder ASC, Id ASC",
        }
    }
}

impl From<&str> for SortOrder {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Paging request that always browses in display order.
pub struct FilterOptions {
    pub page_index: usize,
    pub page_size: usize,
    pub search_query: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
            search_query: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One slice of a filtered result set. `total_count` is measured before
/// slicing so pagers can compute the number of pages.
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> Page<T> {
    /// Pages of `page_size` needed to show every match; zero for a zero
    /// page size.
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(page_size)
        }
    }
}
