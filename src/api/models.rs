use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: i64,
    pub season: i32,
    pub start_date: Option<String>,
    pub status: Option<String>,
    pub home_team_id: i64,
    pub home_team: String,
    pub home_points: Option<i32>,
    pub away_team_id: i64,
    pub away_team: String,
    pub away_points: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScoreResponse {
    pub game_id: i64,
    pub lines: Vec<BoxScoreEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScoreEntry {
    pub player_id: i64,
    pub team_id: Option<i64>,
    pub points: u32,
    pub rim_made: u32,
    pub rim_attempts: u32,
    pub jumper_made: u32,
    pub jumper_attempts: u32,
    pub three_made: u32,
    pub three_attempts: u32,
    pub ft_made: u32,
    pub ft_attempts: u32,
    pub assists: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotEntry {
    pub event_id: i64,
    pub team_id: i64,
    pub shooter_id: i64,
    pub period: u32,
    pub seconds_remaining: i64,
    pub made: bool,
    pub range: String,
    pub assisted: bool,
    pub assisted_by_id: Option<i64>,
    pub x: f64,
    pub y: f64,
    pub teammates: Vec<i64>,
    pub opponents: Vec<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupsResponse {
    pub game_id: i64,
    pub starters: Vec<StartingLineupEntry>,
    pub timeline: Vec<TimelineEntry>,
    pub stints: Vec<StintEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingLineupEntry {
    pub team_id: i64,
    pub players: Vec<i64>,
    pub complete: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub team_id: i64,
    pub event_id: i64,
    pub period: u32,
    pub seconds_remaining: i64,
    pub players: Vec<i64>,
    pub status: String,
    pub bootstrapped: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StintEntry {
    pub period: u32,
    pub home_lineup: Vec<i64>,
    pub away_lineup: Vec<i64>,
    pub start_seconds: i64,
    pub end_seconds: i64,
    pub duration_seconds: i64,
    pub home_points: i64,
    pub away_points: i64,
    pub home_plus_minus: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PossessionEntry {
    pub possession_id: i64,
    pub team_id: Option<i64>,
    pub period: u32,
    pub start_seconds: i64,
    pub end_seconds: i64,
    pub raw_outcome: Option<String>,
    pub refined_outcome: Option<String>,
    pub possession_type: String,
    pub has_oreb: bool,
    pub time_to_first_fga: Option<i64>,
    pub time_oreb_to_fga: Option<i64>,
    pub prev_ender: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FourFactorsEntry {
    pub team_id: i64,
    pub field_goals_attempted: u32,
    pub field_goals_made: u32,
    pub threes_attempted: u32,
    pub threes_made: u32,
    pub twos_attempted: u32,
    pub twos_made: u32,
    pub free_throws_attempted: u32,
    pub free_throws_made: u32,
    pub turnovers: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub opponent_defensive_rebounds: u32,
    pub possessions: f64,
    pub effective_fg_pct: f64,
    pub turnover_pct: f64,
    pub offensive_rebound_pct: f64,
    pub free_throw_rate: f64,
    pub three_point_rate: f64,
    pub tempo: f64,
}
