use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::lineup::LineupStint;

use super::models::StintRow;

pub fn replace_for_game(conn: &Connection, game_id: i64, stints: &[LineupStint]) -> Result<()> {
    conn.execute(
        "DELETE FROM lineup_stints WHERE game_id = ?1",
        params![game_id],
    )
    .context("Failed to clear lineup stints")?;

    let sql = "INSERT INTO lineup_stints (game_id, stint_index, period, home_lineup, away_lineup, start_seconds, end_seconds, start_home_score, start_away_score, end_home_score, end_away_score) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
    let mut stmt = conn.prepare(sql)?;

    for (index, stint) in stints.iter().enumerate() {
        stmt.execute(params![
            game_id,
            index as i64,
            stint.period,
            stint.home_lineup,
            stint.away_lineup,
            stint.start_seconds,
            stint.end_seconds,
            stint.start_home_score,
            stint.start_away_score,
            stint.end_home_score,
            stint.end_away_score
        ])
        .context("Failed to insert lineup stint")?;
    }

    Ok(())
}

fn parse_stint_row(row: &rusqlite::Row) -> rusqlite::Result<StintRow> {
    Ok(StintRow {
        game_id: row.get(0)?,
        stint_index: row.get(1)?,
        period: row.get(2)?,
        home_lineup: row.get(3)?,
        away_lineup: row.get(4)?,
        start_seconds: row.get(5)?,
        end_seconds: row.get(6)?,
        start_home_score: row.get(7)?,
        start_away_score: row.get(8)?,
        end_home_score: row.get(9)?,
        end_away_score: row.get(10)?,
    })
}

pub fn list_for_game(conn: &Connection, game_id: i64) -> Result<Vec<StintRow>> {
    let sql = "SELECT game_id, stint_index, period, home_lineup, away_lineup, start_seconds, end_seconds, start_home_score, start_away_score, end_home_score, end_away_score FROM lineup_stints WHERE game_id = ?1 ORDER BY stint_index";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_stint_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
