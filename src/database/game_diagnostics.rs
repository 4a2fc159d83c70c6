use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::GameDiagnostics;

use super::models::DiagnosticsRow;

pub fn replace_for_game(conn: &Connection, diagnostics: &GameDiagnostics) -> Result<()> {
    conn.execute(
        "DELETE FROM game_diagnostics WHERE game_id = ?1",
        params![diagnostics.game_id],
    )
    .context("Failed to clear game diagnostics")?;

    let bootstraps = diagnostics
        .incomplete_bootstraps
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("|");
    let detail = if diagnostics.inconsistencies.is_empty() {
        None
    } else {
        Some(
            diagnostics
                .inconsistencies
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    };

    let sql = "INSERT INTO game_diagnostics (game_id, unclassified_events, other_events, missing_locations, unattributed_shots, overfull_snapshots, incomplete_bootstraps, inconsistency_count, inconsistency_detail) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

    conn.execute(
        sql,
        params![
            diagnostics.game_id,
            diagnostics.unclassified_events,
            diagnostics.other_events,
            diagnostics.missing_locations,
            diagnostics.unattributed_shots,
            diagnostics.overfull_snapshots,
            bootstraps,
            diagnostics.inconsistencies.len() as u32,
            detail
        ],
    )
    .context("Failed to insert game diagnostics")?;

    Ok(())
}

fn parse_diagnostics_row(row: &rusqlite::Row) -> rusqlite::Result<DiagnosticsRow> {
    Ok(DiagnosticsRow {
        game_id: row.get(0)?,
        unclassified_events: row.get(1)?,
        other_events: row.get(2)?,
        missing_locations: row.get(3)?,
        unattributed_shots: row.get(4)?,
        overfull_snapshots: row.get(5)?,
        incomplete_bootstraps: row.get(6)?,
        inconsistency_count: row.get(7)?,
        inconsistency_detail: row.get(8)?,
    })
}

pub fn get_for_game(conn: &Connection, game_id: i64) -> Result<Option<DiagnosticsRow>> {
    let sql = "SELECT game_id, unclassified_events, other_events, missing_locations, unattributed_shots, overfull_snapshots, incomplete_bootstraps, inconsistency_count, inconsistency_detail FROM game_diagnostics WHERE game_id = ?1";

    conn.query_row(sql, params![game_id], parse_diagnostics_row)
        .optional()
        .context("Failed to fetch game diagnostics")
}
