use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of a game record the pipeline needs downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMeta {
    pub id: i64,
    pub season: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub home_team_id: i64,
    pub home_team: String,
    pub away_team_id: i64,
    pub away_team: String,
}

impl GameMeta {
    /// Resolve a feed team name to its id. Plays attribute teams by name,
    /// game records carry the ids.
    pub fn team_id_for_name(&self, name: &str) -> Option<i64> {
        if name.eq_ignore_ascii_case(&self.home_team) {
            Some(self.home_team_id)
        } else if name.eq_ignore_ascii_case(&self.away_team) {
            Some(self.away_team_id)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, team_id: i64) -> i64 {
        if team_id == self.home_team_id {
            self.away_team_id
        } else {
            self.home_team_id
        }
    }

    pub fn is_home(&self, team_id: i64) -> bool {
        team_id == self.home_team_id
    }
}

// --- API Response Structures ---

/// Raw game record from the CBBD games endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameResponse {
    pub id: i64,
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "homeTeamId", default)]
    pub home_team_id: Option<i64>,
    #[serde(rename = "homeTeam", default)]
    pub home_team: Option<String>,
    #[serde(rename = "homePoints", default)]
    pub home_points: Option<i32>,
    #[serde(rename = "awayTeamId", default)]
    pub away_team_id: Option<i64>,
    #[serde(rename = "awayTeam", default)]
    pub away_team: Option<String>,
    #[serde(rename = "awayPoints", default)]
    pub away_points: Option<i32>,
}

impl GameResponse {
    /// Returns `None` when the record is missing the team identities the
    /// pipeline cannot work without.
    pub fn to_meta(&self, fallback_season: i32) -> Option<GameMeta> {
        let home_team_id = self.home_team_id?;
        let away_team_id = self.away_team_id?;
        let home_team = self.home_team.clone()?;
        let away_team = self.away_team.clone()?;
        let start_date = self
            .start_date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Some(GameMeta {
            id: self.id,
            season: self.season.unwrap_or(fallback_season),
            start_date,
            status: self.status.clone(),
            home_team_id,
            home_team,
            away_team_id,
            away_team,
        })
    }
}

/// Raw play record from the CBBD plays endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayResponse {
    pub id: i64,
    #[serde(rename = "gameId")]
    pub game_id: i64,
    #[serde(default)]
    pub period: Option<u32>,
    #[serde(default)]
    pub clock: Option<String>,
    #[serde(rename = "secondsRemaining", default)]
    pub seconds_remaining: Option<f64>,
    #[serde(rename = "playType", default)]
    pub play_type: Option<String>,
    #[serde(rename = "playText", default)]
    pub play_text: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(rename = "teamId", default)]
    pub team_id: Option<i64>,
    #[serde(rename = "homeScore", default)]
    pub home_score: Option<u32>,
    #[serde(rename = "awayScore", default)]
    pub away_score: Option<u32>,
    #[serde(rename = "shootingPlay", default)]
    pub shooting_play: bool,
    #[serde(rename = "scoringPlay", default)]
    pub scoring_play: bool,
    #[serde(rename = "sequenceNumber", default)]
    pub sequence_number: Option<i64>,
    #[serde(default)]
    pub participants: Vec<PlayParticipant>,
    #[serde(rename = "shotInfo", default)]
    pub shot_info: Option<ShotInfoResponse>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayParticipant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShotInfoResponse {
    #[serde(default)]
    pub shooter: Option<AthleteRef>,
    #[serde(default)]
    pub made: Option<bool>,
    #[serde(default)]
    pub assisted: Option<bool>,
    #[serde(rename = "assistedBy", default)]
    pub assisted_by: Option<AthleteRef>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub location: Option<ShotLocation>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AthleteRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShotLocation {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}
