use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::four_factors::TeamFactors;

use super::models::FourFactorsRow;

pub fn replace_for_game(conn: &Connection, game_id: i64, factors: &[TeamFactors]) -> Result<()> {
    conn.execute(
        "DELETE FROM four_factors WHERE game_id = ?1",
        params![game_id],
    )
    .context("Failed to clear four factors")?;

    let sql = "INSERT INTO four_factors (game_id, team_id, field_goals_attempted, field_goals_made, threes_attempted, threes_made, twos_attempted, twos_made, free_throws_attempted, free_throws_made, turnovers, offensive_rebounds, defensive_rebounds, opponent_defensive_rebounds, possessions, effective_fg_pct, turnover_pct, offensive_rebound_pct, free_throw_rate, three_point_rate, tempo) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)";
    let mut stmt = conn.prepare(sql)?;

    for team in factors {
        stmt.execute(params![
            game_id,
            team.team_id,
            team.field_goals_attempted,
            team.field_goals_made,
            team.threes_attempted,
            team.threes_made,
            team.twos_attempted,
            team.twos_made,
            team.free_throws_attempted,
            team.free_throws_made,
            team.turnovers,
            team.offensive_rebounds,
            team.defensive_rebounds,
            team.opponent_defensive_rebounds,
            team.possessions,
            team.effective_fg_pct,
            team.turnover_pct,
            team.offensive_rebound_pct,
            team.free_throw_rate,
            team.three_point_rate,
            team.tempo
        ])
        .context("Failed to insert four factors")?;
    }

    Ok(())
}

fn parse_four_factors_row(row: &rusqlite::Row) -> rusqlite::Result<FourFactorsRow> {
    Ok(FourFactorsRow {
        game_id: row.get(0)?,
        team_id: row.get(1)?,
        field_goals_attempted: row.get(2)?,
        field_goals_made: row.get(3)?,
        threes_attempted: row.get(4)?,
        threes_made: row.get(5)?,
        twos_attempted: row.get(6)?,
        twos_made: row.get(7)?,
        free_throws_attempted: row.get(8)?,
        free_throws_made: row.get(9)?,
        turnovers: row.get(10)?,
        offensive_rebounds: row.get(11)?,
        defensive_rebounds: row.get(12)?,
        opponent_defensive_rebounds: row.get(13)?,
        possessions: row.get(14)?,
        effective_fg_pct: row.get(15)?,
        turnover_pct: row.get(16)?,
        offensive_rebound_pct: row.get(17)?,
        free_throw_rate: row.get(18)?,
        three_point_rate: row.get(19)?,
        tempo: row.get(20)?,
    })
}

pub fn list_for_game(conn: &Connection, game_id: i64) -> Result<Vec<FourFactorsRow>> {
    let sql = "SELECT game_id, team_id, field_goals_attempted, field_goals_made, threes_attempted, threes_made, twos_attempted, twos_made, free_throws_attempted, free_throws_made, turnovers, offensive_rebounds, defensive_rebounds, opponent_defensive_rebounds, possessions, effective_fg_pct, turnover_pct, offensive_rebound_pct, free_throw_rate, three_point_rate, tempo FROM four_factors WHERE game_id = ?1 ORDER BY team_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_four_factors_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
