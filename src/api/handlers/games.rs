use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{
    BoxScoreEntry, BoxScoreResponse, FourFactorsEntry, GameSummary, LineupsResponse,
    PossessionEntry, ShotEntry, StartingLineupEntry, StintEntry, TimelineEntry,
};
use crate::database::{self, StintRow};

use super::AppState;

/// `|`-joined id keys come back out of storage as player id lists.
fn parse_player_key(key: &str) -> Vec<i64> {
    key.split('|').filter_map(|part| part.parse().ok()).collect()
}

fn stint_entry_from(row: StintRow) -> StintEntry {
    let home_points = i64::from(row.end_home_score) - i64::from(row.start_home_score);
    let away_points = i64::from(row.end_away_score) - i64::from(row.start_away_score);
    StintEntry {
        period: row.period,
        home_lineup: parse_player_key(&row.home_lineup),
        away_lineup: parse_player_key(&row.away_lineup),
        start_seconds: row.start_seconds,
        end_seconds: row.end_seconds,
        duration_seconds: row.start_seconds - row.end_seconds,
        home_points,
        away_points,
        home_plus_minus: home_points - away_points,
    }
}

pub async fn get_games(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let rows = match database::games::list_all(&conn) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let games: Vec<GameSummary> = rows.into_iter().map(|row| GameSummary {
        id: row.id,
        season: row.season,
        start_date: row.start_date.map(|d| d.to_rfc3339()),
        status: row.status,
        home_team_id: row.home_team_id,
        home_team: row.home_team,
        home_points: row.home_points,
        away_team_id: row.away_team_id,
        away_team: row.away_team,
        away_points: row.away_points,
    }).collect();

    Json(games).into_response()
}

pub async fn get_boxscore(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::games::get_by_id(&conn, game_id) {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, format!("Game {} not found", game_id)).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }

    let rows = match database::box_scores::list_for_game(&conn, game_id) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let lines: Vec<BoxScoreEntry> = rows.into_iter().map(|row| BoxScoreEntry {
        player_id: row.player_id,
        team_id: row.team_id,
        points: row.points,
        rim_made: row.rim_made,
        rim_attempts: row.rim_attempts,
        jumper_made: row.jumper_made,
        jumper_attempts: row.jumper_attempts,
        three_made: row.three_made,
        three_attempts: row.three_attempts,
        ft_made: row.ft_made,
        ft_attempts: row.ft_attempts,
        assists: row.assists,
    }).collect();

    Json(BoxScoreResponse { game_id, lines }).into_response()
}

pub async fn get_shots(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::games::get_by_id(&conn, game_id) {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, format!("Game {} not found", game_id)).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }

    let rows = match database::shots::list_for_game(&conn, game_id) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let shots: Vec<ShotEntry> = rows.into_iter().map(|row| ShotEntry {
        event_id: row.event_id,
        team_id: row.team_id,
        shooter_id: row.shooter_id,
        period: row.period,
        seconds_remaining: row.seconds_remaining,
        made: row.made,
        range: row.shot_range,
        assisted: row.assisted,
        assisted_by_id: row.assisted_by_id,
        x: row.x,
        y: row.y,
        teammates: parse_player_key(&row.teammates),
        opponents: parse_player_key(&row.opponents),
    }).collect();

    Json(shots).into_response()
}

pub async fn get_lineups(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::games::get_by_id(&conn, game_id) {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, format!("Game {} not found", game_id)).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }

    let starter_rows = match database::starting_lineups::list_for_game(&conn, game_id) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };
    let timeline_rows = match database::lineup_timeline::list_for_game(&conn, game_id) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };
    let stint_rows = match database::lineup_stints::list_for_game(&conn, game_id) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let starters: Vec<StartingLineupEntry> = starter_rows.into_iter().map(|row| StartingLineupEntry {
        team_id: row.team_id,
        players: parse_player_key(&row.players),
        complete: row.complete,
    }).collect();

    let timeline: Vec<TimelineEntry> = timeline_rows.into_iter().map(|row| TimelineEntry {
        team_id: row.team_id,
        event_id: row.event_id,
        period: row.period,
        seconds_remaining: row.seconds_remaining,
        players: parse_player_key(&row.players),
        status: row.status,
        bootstrapped: row.bootstrapped,
    }).collect();

    let stints: Vec<StintEntry> = stint_rows.into_iter().map(stint_entry_from).collect();

    Json(LineupsResponse {
        game_id,
        starters,
        timeline,
        stints,
    }).into_response()
}

pub async fn get_possessions(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::games::get_by_id(&conn, game_id) {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, format!("Game {} not found", game_id)).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }

    let rows = match database::possessions::list_for_game(&conn, game_id) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let possessions: Vec<PossessionEntry> = rows.into_iter().map(|row| PossessionEntry {
        possession_id: row.possession_id,
        team_id: row.team_id,
        period: row.period,
        start_seconds: row.start_seconds,
        end_seconds: row.end_seconds,
        raw_outcome: row.raw_outcome,
        refined_outcome: row.refined_outcome,
        possession_type: row.possession_type,
        has_oreb: row.has_oreb,
        time_to_first_fga: row.time_to_first_fga,
        time_oreb_to_fga: row.time_oreb_to_fga,
        prev_ender: row.prev_ender,
    }).collect();

    Json(possessions).into_response()
}

pub async fn get_four_factors(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::games::get_by_id(&conn, game_id) {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, format!("Game {} not found", game_id)).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }

    let rows = match database::four_factors::list_for_game(&conn, game_id) {
        Ok(rows) => rows,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let factors: Vec<FourFactorsEntry> = rows.into_iter().map(|row| FourFactorsEntry {
        team_id: row.team_id,
        field_goals_attempted: row.field_goals_attempted,
        field_goals_made: row.field_goals_made,
        threes_attempted: row.threes_attempted,
        threes_made: row.threes_made,
        twos_attempted: row.twos_attempted,
        twos_made: row.twos_made,
        free_throws_attempted: row.free_throws_attempted,
        free_throws_made: row.free_throws_made,
        turnovers: row.turnovers,
        offensive_rebounds: row.offensive_rebounds,
        defensive_rebounds: row.defensive_rebounds,
        opponent_defensive_rebounds: row.opponent_defensive_rebounds,
        possessions: row.possessions,
        effective_fg_pct: row.effective_fg_pct,
        turnover_pct: row.turnover_pct,
        offensive_rebound_pct: row.offensive_rebound_pct,
        free_throw_rate: row.free_throw_rate,
        three_point_rate: row.three_point_rate,
        tempo: row.tempo,
    }).collect();

    Json(factors).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_key() {
        assert_eq!(parse_player_key("1|2|30"), vec![1, 2, 30]);
        assert!(parse_player_key("").is_empty());
    }

    #[test]
    fn test_stint_entry_derives_plus_minus() {
        let entry = stint_entry_from(StintRow {
            game_id: 401,
            stint_index: 0,
            period: 1,
            home_lineup: "1|2|3|4|5".to_string(),
            away_lineup: "21|22|23|24|25".to_string(),
            start_seconds: 1200,
            end_seconds: 900,
            start_home_score: 0,
            start_away_score: 0,
            end_home_score: 10,
            end_away_score: 6,
        });
        assert_eq!(entry.duration_seconds, 300);
        assert_eq!(entry.home_points, 10);
        assert_eq!(entry.away_points, 6);
        assert_eq!(entry.home_plus_minus, 4);
        assert_eq!(entry.home_lineup, vec![1, 2, 3, 4, 5]);
    }
}
