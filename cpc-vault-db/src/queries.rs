//! Read queries for the catalog database beyond the record store contract.
//!
//! Provides title search, status filtering, and summary statistics.

use cpc_vault_catalog::{CatalogEntry, GameStatus};
use rusqlite::{Connection, params};

use crate::operations::{GAME_COLUMNS, GAME_ORDER, OperationError, row_to_game};

/// Search games by title, in display order.
///
/// `query` is matched literally as a case-insensitive substring; `%` and `_`
/// carry no wildcard meaning.
pub fn search_games(conn: &Connection, query: &str) -> Result<Vec<CatalogEntry>, OperationError> {
    let pattern = format!("%{}%", escape_like(query));
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE title LIKE ?1 ESCAPE '\\' ORDER BY {GAME_ORDER}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List games with the given status, in display order.
pub fn games_by_status(
    conn: &Connection,
    status: GameStatus,
) -> Result<Vec<CatalogEntry>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE status = ?1 ORDER BY {GAME_ORDER}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![status.as_str()], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    let finished: i64 = conn.query_row(
        "SELECT COUNT(*) FROM games WHERE status = 'finished'",
        [],
        |r| r.get(0),
    )?;
    let work_in_progress: i64 = conn.query_row(
        "SELECT COUNT(*) FROM games WHERE status = 'wip'",
        [],
        |r| r.get(0),
    )?;
    let unordered: i64 = conn.query_row(
        "SELECT COUNT(*) FROM games WHERE display_order IS NULL",
        [],
        |r| r.get(0),
    )?;
    let (earliest_year, latest_year): (Option<i32>, Option<i32>) =
        conn.query_row("SELECT MIN(year), MAX(year) FROM games", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })?;

    let mut stmt = conn.prepare(
        "SELECT genre, COUNT(*) FROM games GROUP BY genre ORDER BY COUNT(*) DESC, genre",
    )?;
    let genres = stmt
        .query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CatalogStats {
        games,
        finished,
        work_in_progress,
        unordered,
        earliest_year,
        latest_year,
        genres,
    })
}

/// Summary counts for the catalog.
#[derive(Debug, Default)]
pub struct CatalogStats {
    pub games: i64,
    pub finished: i64,
    pub work_in_progress: i64,
    /// Games without an explicit display position.
    pub unordered: i64,
    pub earliest_year: Option<i32>,
    pub latest_year: Option<i32>,
    /// `(genre, count)`, most common first.
    pub genres: Vec<(String, i64)>,
}
