use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::shotchart::ShotRecord;

use super::models::ShotRow;

fn player_key(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

pub fn replace_for_game(conn: &Connection, game_id: i64, shots: &[ShotRecord]) -> Result<()> {
    conn.execute("DELETE FROM shots WHERE game_id = ?1", params![game_id])
        .context("Failed to clear shots")?;

    let sql = "INSERT INTO shots (game_id, event_id, team_id, shooter_id, period, seconds_remaining, made, shot_range, assisted, assisted_by_id, x, y, teammates, opponents) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
    let mut stmt = conn.prepare(sql)?;

    for shot in shots {
        stmt.execute(params![
            game_id,
            shot.event_id,
            shot.team_id,
            shot.shooter_id,
            shot.period,
            shot.seconds_remaining,
            shot.made,
            shot.range.as_str(),
            shot.assisted,
            shot.assisted_by_id,
            shot.x,
            shot.y,
            player_key(&shot.teammates),
            player_key(&shot.opponents)
        ])
        .context("Failed to insert shot")?;
    }

    Ok(())
}

fn parse_shot_row(row: &rusqlite::Row) -> rusqlite::Result<ShotRow> {
    Ok(ShotRow {
        game_id: row.get(0)?,
        event_id: row.get(1)?,
        team_id: row.get(2)?,
        shooter_id: row.get(3)?,
        period: row.get(4)?,
        seconds_remaining: row.get(5)?,
        made: row.get(6)?,
        shot_range: row.get(7)?,
        assisted: row.get(8)?,
        assisted_by_id: row.get(9)?,
        x: row.get(10)?,
        y: row.get(11)?,
        teammates: row.get(12)?,
        opponents: row.get(13)?,
    })
}

pub fn list_for_game(conn: &Connection, game_id: i64) -> Result<Vec<ShotRow>> {
    let sql = "SELECT game_id, event_id, team_id, shooter_id, period, seconds_remaining, made, shot_range, assisted, assisted_by_id, x, y, teammates, opponents FROM shots WHERE game_id = ?1 ORDER BY event_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_shot_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
