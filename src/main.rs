//! Binary entry point: resolve configuration, bring up logging and the
//! SQLite store, then run a single admin command against it.
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use media_theme_manager::{
    logging, Config, MediaTheme, MediaThemeRepository, SortOrder, SqliteThemeRepository,
    ThemeError,
};
use tracing::error;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()
        .and_then(|config| config.with_database_path(cli.db.clone()))
        .context("failed to load configuration")?;
    logging::init(&config.log_filter);

    let repo = SqliteThemeRepository::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;

    run(&repo, cli.command).inspect_err(|err| {
        let from_store = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<ThemeError>())
            .any(ThemeError::is_persistence);
        if from_store {
            error!("storage failure; retry once the theme store is reachable and healthy");
        }
    })
}

fn run(repo: &impl MediaThemeRepository, command: Command) -> Result<()> {
    match command {
        Command::Add {
            name,
            created_by,
            inactive,
        } => {
            let mut theme = MediaTheme::new(name);
            theme.created_by = created_by;
            theme.active = Some(!inactive);
            let theme = repo.add(theme).context("failed to add theme")?;
            println!("Added theme {} at position {}.", theme.id, theme.display_order);
        }
        Command::List => {
            let themes = repo.get_all().context("failed to list themes")?;
            if themes.is_empty() {
                println!("No themes yet.");
            }
            for theme in &themes {
                print_theme(theme);
            }
        }
        Command::Show { id } => match repo.get_by_id(id).context("failed to load theme")? {
            Some(theme) => print_theme(&theme),
            None => println!("Theme {id} not found."),
        },
        Command::Update { id, name, active } => {
            let Some(mut theme) = repo.get_by_id(id).context("failed to load theme")? else {
                println!("Theme {id} not found.");
                return Ok(());
            };
            if let Some(name) = name {
                theme.name = name;
            }
            if let Some(active) = active {
                theme.active = Some(active);
            }
            report(repo.update(&theme).context("failed to update theme")?, id, "updated");
        }
        Command::Delete { id } => {
            report(repo.delete(id).context("failed to delete theme")?, id, "deleted");
        }
        Command::Toggle { id } => {
            report(repo.toggle_active(id).context("failed to toggle theme")?, id, "toggled");
        }
        Command::Page {
            page,
            size,
            search,
            sort,
            next_sort,
        } => {
            let mut sort = SortOrder::from_token(&sort);
            if next_sort {
                sort = sort.cycle();
            }
            let result = repo
                .get_page(page, size, &search, sort)
                .context("failed to page themes")?;
            for theme in &result.items {
                print_theme(theme);
            }
            println!(
                "Page {} of {} ({} matching, sorted by {sort}).",
                page + 1,
                result.page_count(size).max(1),
                result.total_count
            );
        }
        Command::MoveUp { id } => {
            if repo.move_up(id) {
                println!("Theme {id} moved up.");
            } else {
                println!("Theme {id} was not moved.");
            }
        }
        Command::MoveDown { id } => {
            if repo.move_down(id) {
                println!("Theme {id} moved down.");
            } else {
                println!("Theme {id} was not moved.");
            }
        }
    }

    Ok(())
}

fn report(affected: bool, id: i64, verb: &str) {
    if affected {
        println!("Theme {id} {verb}.");
    } else {
        println!("Theme {id} not found.");
    }
}

fn print_theme(theme: &MediaTheme) {
    println!(
        "{:>5}  {:>4}  {:<8}  {}  {}  {}",
        theme.id,
        theme.display_order,
        if theme.is_active() { "active" } else { "hidden" },
        theme.created.format("%Y-%m-%d %H:%M:%S"),
        theme.created_by.as_deref().unwrap_or("-"),
        theme
    );
}
