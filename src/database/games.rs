use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::GameRow;

/// Insert or overwrite one game record. `created_at` tracks the last write.
pub fn upsert_game(conn: &Connection, game: &GameRow) -> Result<()> {
    let sql = "INSERT OR REPLACE INTO games (id, season, start_date, status, home_team_id, home_team, home_points, away_team_id, away_team, away_points) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

    conn.execute(
        sql,
        params![
            game.id,
            game.season,
            game.start_date,
            game.status,
            game.home_team_id,
            game.home_team,
            game.home_points,
            game.away_team_id,
            game.away_team,
            game.away_points
        ],
    )
    .context("Failed to upsert game")?;

    Ok(())
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<GameRow> {
    Ok(GameRow {
        id: row.get(0)?,
        season: row.get(1)?,
        start_date: row.get(2)?,
        status: row.get(3)?,
        home_team_id: row.get(4)?,
        home_team: row.get(5)?,
        home_points: row.get(6)?,
        away_team_id: row.get(7)?,
        away_team: row.get(8)?,
        away_points: row.get(9)?,
        created_at: row.get(10)?,
    })
}

const GAME_COLUMNS: &str = "id, season, start_date, status, home_team_id, home_team, home_points, away_team_id, away_team, away_points, created_at";

pub fn list_all(conn: &Connection) -> Result<Vec<GameRow>> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games ORDER BY start_date DESC, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn get_by_id(conn: &Connection, game_id: i64) -> Result<Option<GameRow>> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1");

    conn.query_row(&sql, params![game_id], parse_game_row)
        .optional()
        .context("Failed to fetch game")
}
