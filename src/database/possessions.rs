use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::possession::Possession;

use super::models::PossessionRow;

pub fn replace_for_game(
    conn: &Connection,
    game_id: i64,
    possessions: &[Possession],
) -> Result<()> {
    conn.execute(
        "DELETE FROM possessions WHERE game_id = ?1",
        params![game_id],
    )
    .context("Failed to clear possessions")?;

    let sql = "INSERT INTO possessions (game_id, possession_id, team_id, period, start_seconds, end_seconds, raw_outcome, refined_outcome, possession_type, has_oreb, time_to_first_fga, time_oreb_to_fga, prev_ender) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
    let mut stmt = conn.prepare(sql)?;

    for possession in possessions {
        stmt.execute(params![
            game_id,
            possession.possession_id,
            possession.team_id,
            possession.period,
            possession.start_seconds,
            possession.end_seconds,
            possession.raw_outcome.map(|o| o.as_str()),
            possession.refined_outcome,
            possession.possession_type.as_str(),
            possession.has_oreb,
            possession.time_to_first_fga,
            possession.time_oreb_to_fga,
            possession.prev_ender
        ])
        .context("Failed to insert possession")?;
    }

    Ok(())
}

fn parse_possession_row(row: &rusqlite::Row) -> rusqlite::Result<PossessionRow> {
    Ok(PossessionRow {
        game_id: row.get(0)?,
        possession_id: row.get(1)?,
        team_id: row.get(2)?,
        period: row.get(3)?,
        start_seconds: row.get(4)?,
        end_seconds: row.get(5)?,
        raw_outcome: row.get(6)?,
        refined_outcome: row.get(7)?,
        possession_type: row.get(8)?,
        has_oreb: row.get(9)?,
        time_to_first_fga: row.get(10)?,
        time_oreb_to_fga: row.get(11)?,
        prev_ender: row.get(12)?,
    })
}

pub fn list_for_game(conn: &Connection, game_id: i64) -> Result<Vec<PossessionRow>> {
    let sql = "SELECT game_id, possession_id, team_id, period, start_seconds, end_seconds, raw_outcome, refined_outcome, possession_type, has_oreb, time_to_first_fga, time_oreb_to_fga, prev_ender FROM possessions WHERE game_id = ?1 ORDER BY possession_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_possession_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
