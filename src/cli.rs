use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Maintain the ordered catalog of media themes."
)]
pub struct Cli {
    /// SQLite database file. Overrides MEDIA_THEMES_DB.
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a theme at the end of the display order.
    Add {
        name: String,
        /// Author recorded on the new theme.
        #[arg(long)]
        created_by: Option<String>,
        /// Create the theme hidden.
        #[arg(long)]
        inactive: bool,
    },
    /// List every theme in display order.
    List,
    /// Show one theme.
    Show { id: i64 },
    /// Change a theme's name or visibility.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Soft-delete a theme.
    Delete { id: i64 },
    /// Flip a theme's visibility.
    Toggle { id: i64 },
    /// Search and page through themes.
    Page {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        size: usize,
        /// Name substring to match.
        #[arg(long, default_value = "")]
        search: String,
        /// Name, NameDesc or DisplayOrder.
        #[arg(long, default_value = "DisplayOrder")]
        sort: String,
        /// Advance the sort one step (display order, name, name descending)
        /// before paging.
        #[arg(long)]
        next_sort: bool,
    },
    /// Swap a theme with the one just above it.
    MoveUp { id: i64 },
    /// Swap a theme with the one just below it.
    MoveDown { id: i64 },
}
