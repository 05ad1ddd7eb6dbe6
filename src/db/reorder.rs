//! Manual ordering by adjacent swap.
//!
//! A move looks up the target and its nearest live neighbour on one side and
//! exchanges their `DisplayOrder` values. Both reads and both writes run in a
//! single immediate transaction, so readers see either the old pair or the
//! swapped pair and never a half-written state.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info, warn};

use super::connection::{open_connection, NOT_DELETED};
use crate::error::{Result, ResultExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Towards smaller display order values.
    Up,
    /// Towards larger display order values.
    Down,
}

impl Direction {
    fn neighbor_query(self) -> String {
        let (op, order) = match self {
            Self::Up => ("<", "DESC"),
            Self::Down => (">", "ASC"),
        };
        format!(
            "SELECT Id, DisplayOrder FROM MediaThemes
             WHERE DisplayOrder {op} ?1 AND {NOT_DELETED}
             ORDER BY DisplayOrder {order}, Id {order}
             LIMIT 1"
        )
    }
}

/// Run one move against the database at `path`. Storage failures are logged
/// and reported as `false`; the transaction is rolled back when dropped.
pub(crate) fn move_theme(path: &Path, id: i64, direction: Direction) -> bool {
    let outcome =
        open_connection(path).and_then(|mut conn| swap_with_neighbor(&mut conn, id, direction));

    match outcome {
        Ok(moved) => moved,
        Err(err) => {
            warn!(id, ?direction, error = %err, "reorder failed, nothing changed");
            false
        }
    }
}

fn swap_with_neighbor(conn: &mut Connection, id: i64, direction: Direction) -> Result<bool> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .persist("failed to start reorder transaction")?;

    let current: Option<(i64, i64)> = tx
        .query_row(
            &format!("SELECT Id, DisplayOrder FROM MediaThemes WHERE Id = ?1 AND {NOT_DELETED}"),
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .persist("failed to load theme to move")?;

    let Some((current_id, current_order)) = current else {
        debug!(id, ?direction, "theme to move not found");
        return Ok(false);
    };

    let neighbor: Option<(i64, i64)> = tx
        .query_row(&direction.neighbor_query(), [current_order], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()
        .persist("failed to find neighbouring theme")?;

    let Some((neighbor_id, neighbor_order)) = neighbor else {
        debug!(id, ?direction, "theme already at the edge");
        return Ok(false);
    };

    tx.execute(
        "UPDATE MediaThemes SET DisplayOrder = ?1 WHERE Id = ?2",
        params![neighbor_order, current_id],
    )
    .persist("failed to write moved theme order")?;
    tx.execute(
        "UPDATE MediaThemes SET DisplayOrder = ?1 WHERE Id = ?2",
        params![current_order, neighbor_id],
    )
    .persist("failed to write neighbour theme order")?;

    tx.commit().persist("failed to commit reorder")?;

    info!(
        id = current_id,
        neighbor = neighbor_id,
        ?direction,
        from = current_order,
        to = neighbor_order,
        "theme moved"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_queries_look_on_the_right_side() {
        let up = Direction::Up.neighbor_query();
        assert!(up.contains("DisplayOrder < ?1"));
        assert!(up.contains("ORDER BY DisplayOrder DESC"));

        let down = Direction::Down.neighbor_query();
        assert!(down.contains("DisplayOrder > ?1"));
        assert!(down.contains("ORDER BY DisplayOrder ASC"));
        assert!(down.contains(NOT_DELETED));
    }

    #[test]
    fn missing_database_directory_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("themes.sqlite");
        assert!(!move_theme(&path, 1, Direction::Up));
    }
}
