use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::lineup::{lineup_key, StartingLineup};

use super::models::StartingLineupRow;

pub fn replace_for_game(
    conn: &Connection,
    game_id: i64,
    starters: &[StartingLineup],
) -> Result<()> {
    conn.execute(
        "DELETE FROM starting_lineups WHERE game_id = ?1",
        params![game_id],
    )
    .context("Failed to clear starting lineups")?;

    let sql = "INSERT INTO starting_lineups (game_id, team_id, event_id, players, complete) VALUES (?1, ?2, ?3, ?4, ?5)";
    let mut stmt = conn.prepare(sql)?;

    for lineup in starters {
        stmt.execute(params![
            game_id,
            lineup.team_id,
            lineup.event_id,
            lineup_key(&lineup.players),
            lineup.complete
        ])
        .context("Failed to insert starting lineup")?;
    }

    Ok(())
}

fn parse_starting_lineup_row(row: &rusqlite::Row) -> rusqlite::Result<StartingLineupRow> {
    Ok(StartingLineupRow {
        game_id: row.get(0)?,
        team_id: row.get(1)?,
        event_id: row.get(2)?,
        players: row.get(3)?,
        complete: row.get(4)?,
    })
}

pub fn list_for_game(conn: &Connection, game_id: i64) -> Result<Vec<StartingLineupRow>> {
    let sql = "SELECT game_id, team_id, event_id, players, complete FROM starting_lineups WHERE game_id = ?1 ORDER BY team_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_starting_lineup_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
