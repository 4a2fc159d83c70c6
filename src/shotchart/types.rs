use crate::pbp::ShotRange;

/// One located shot, carrying both on-floor fives at the moment it went up.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    pub game_id: i64,
    pub event_id: i64,
    pub team_id: i64,
    pub shooter_id: i64,
    pub period: u32,
    pub seconds_remaining: i64,
    pub made: bool,
    pub range: ShotRange,
    pub assisted: bool,
    pub assisted_by_id: Option<i64>,
    pub x: f64,
    pub y: f64,
    pub teammates: Vec<i64>,
    pub opponents: Vec<i64>,
}
