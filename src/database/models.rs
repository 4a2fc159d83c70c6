use chrono::{DateTime, NaiveDateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    pub id: i64,
    pub season: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub home_team_id: i64,
    pub home_team: String,
    pub home_points: Option<i32>,
    pub away_team_id: i64,
    pub away_team: String,
    pub away_points: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
}

/// One on-floor snapshot; `players` is the sorted `|`-joined id key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub game_id: i64,
    pub team_id: i64,
    pub event_id: i64,
    pub event_ordinal: i64,
    pub period: u32,
    pub seconds_remaining: i64,
    pub players: String,
    pub status: String,
    pub bootstrapped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartingLineupRow {
    pub game_id: i64,
    pub team_id: i64,
    pub event_id: i64,
    pub players: String,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxScoreRow {
    pub game_id: i64,
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

#[derive(Debug, Clone, PartialEq)]
pub struct ShotRow {
    pub game_id: i64,
    pub event_id: i64,
    pub team_id: i64,
    pub shooter_id: i64,
    pub period: u32,
    pub seconds_remaining: i64,
    pub made: bool,
    pub shot_range: String,
    pub assisted: bool,
    pub assisted_by_id: Option<i64>,
    pub x: f64,
    pub y: f64,
    pub teammates: String,
    pub opponents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StintRow {
    pub game_id: i64,
    pub stint_index: i64,
    pub period: u32,
    pub home_lineup: String,
    pub away_lineup: String,
    pub start_seconds: i64,
    pub end_seconds: i64,
    pub start_home_score: u32,
    pub start_away_score: u32,
    pub end_home_score: u32,
    pub end_away_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossessionRow {
    pub game_id: i64,
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

#[derive(Debug, Clone, PartialEq)]
pub struct FourFactorsRow {
    pub game_id: i64,
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

/// Per-game quality summary. `incomplete_bootstraps` is a `|`-joined list of
/// team ids; `inconsistency_detail` holds one rendered line per recorded
/// inconsistency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsRow {
    pub game_id: i64,
    pub unclassified_events: u32,
    pub other_events: u32,
    pub missing_locations: u32,
    pub unattributed_shots: u32,
    pub overfull_snapshots: u32,
    pub incomplete_bootstraps: String,
    pub inconsistency_count: u32,
    pub inconsistency_detail: Option<String>,
}
