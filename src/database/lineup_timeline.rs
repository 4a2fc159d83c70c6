use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::lineup::{lineup_key, LineupTimeline};

use super::models::TimelineRow;

pub fn replace_for_game(conn: &Connection, game_id: i64, timeline: &LineupTimeline) -> Result<()> {
    conn.execute(
        "DELETE FROM lineup_timeline WHERE game_id = ?1",
        params![game_id],
    )
    .context("Failed to clear lineup timeline")?;

    let sql = "INSERT INTO lineup_timeline (game_id, team_id, event_id, event_ordinal, period, seconds_remaining, players, status, bootstrapped) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
    let mut stmt = conn.prepare(sql)?;

    for (_, team) in timeline.iter() {
        for snapshot in &team.snapshots {
            stmt.execute(params![
                game_id,
                snapshot.team_id,
                snapshot.event_id,
                snapshot.event_ordinal as i64,
                snapshot.period,
                snapshot.seconds_remaining,
                lineup_key(&snapshot.players),
                snapshot.status.as_str(),
                snapshot.bootstrapped
            ])
            .context("Failed to insert lineup snapshot")?;
        }
    }

    Ok(())
}

fn parse_timeline_row(row: &rusqlite::Row) -> rusqlite::Result<TimelineRow> {
    Ok(TimelineRow {
        game_id: row.get(0)?,
        team_id: row.get(1)?,
        event_id: row.get(2)?,
        event_ordinal: row.get(3)?,
        period: row.get(4)?,
        seconds_remaining: row.get(5)?,
        players: row.get(6)?,
        status: row.get(7)?,
        bootstrapped: row.get(8)?,
    })
}

pub fn list_for_game(conn: &Connection, game_id: i64) -> Result<Vec<TimelineRow>> {
    let sql = "SELECT game_id, team_id, event_id, event_ordinal, period, seconds_remaining, players, status, bootstrapped FROM lineup_timeline WHERE game_id = ?1 ORDER BY team_id, event_ordinal";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_timeline_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
