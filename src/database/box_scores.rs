use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::boxscore::BoxScoreLine;

use super::models::BoxScoreRow;

pub fn replace_for_game(conn: &Connection, game_id: i64, lines: &[BoxScoreLine]) -> Result<()> {
    conn.execute("DELETE FROM box_scores WHERE game_id = ?1", params![game_id])
        .context("Failed to clear box scores")?;

    let sql = "INSERT INTO box_scores (game_id, player_id, team_id, points, rim_made, rim_attempts, jumper_made, jumper_attempts, three_made, three_attempts, ft_made, ft_attempts, assists) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
    let mut stmt = conn.prepare(sql)?;

    for line in lines {
        stmt.execute(params![
            game_id,
            line.player_id,
            line.team_id,
            line.points,
            line.rim_made,
            line.rim_attempts,
            line.jumper_made,
            line.jumper_attempts,
            line.three_made,
            line.three_attempts,
            line.ft_made,
            line.ft_attempts,
            line.assists
        ])
        .context("Failed to insert box score line")?;
    }

    Ok(())
}

fn parse_box_score_row(row: &rusqlite::Row) -> rusqlite::Result<BoxScoreRow> {
    Ok(BoxScoreRow {
        game_id: row.get(0)?,
        player_id: row.get(1)?,
        team_id: row.get(2)?,
        points: row.get(3)?,
        rim_made: row.get(4)?,
        rim_attempts: row.get(5)?,
        jumper_made: row.get(6)?,
        jumper_attempts: row.get(7)?,
        three_made: row.get(8)?,
        three_attempts: row.get(9)?,
        ft_made: row.get(10)?,
        ft_attempts: row.get(11)?,
        assists: row.get(12)?,
    })
}

pub fn list_for_game(conn: &Connection, game_id: i64) -> Result<Vec<BoxScoreRow>> {
    let sql = "SELECT game_id, player_id, team_id, points, rim_made, rim_attempts, jumper_made, jumper_attempts, three_made, three_attempts, ft_made, ft_attempts, assists FROM box_scores WHERE game_id = ?1 ORDER BY points DESC, player_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_box_score_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
