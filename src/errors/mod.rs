use std::fmt;

/// Fatal defect in a play-by-play feed. Raising one abandons the whole game;
/// recoverable conditions are tallied into [`GameDiagnostics`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    EmptyFeed,
    MissingField { index: usize, field: &'static str },
    InvalidClock { index: usize, raw: String },
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationError::EmptyFeed => write!(f, "play-by-play feed is empty"),
            NormalizationError::MissingField { index, field } => {
                write!(f, "play #{index} is missing required field '{field}'")
            }
            NormalizationError::InvalidClock { index, raw } => {
                write!(f, "play #{index} has unparseable clock '{raw}'")
            }
        }
    }
}

impl std::error::Error for NormalizationError {}

/// How a substitution contradicted the tracked lineup state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyKind {
    /// Substitution-out for a player not currently on the floor.
    RemoveAbsent,
    /// Substitution-in for a player already on the floor.
    AddPresent,
    /// Substitution with no team attribution, so it cannot be applied.
    MissingTeam,
    /// Substitution with no resolvable player id.
    MissingPlayer,
}

impl InconsistencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InconsistencyKind::RemoveAbsent => "remove_absent",
            InconsistencyKind::AddPresent => "add_present",
            InconsistencyKind::MissingTeam => "missing_team",
            InconsistencyKind::MissingPlayer => "missing_player",
        }
    }
}

/// A substitution event that disagreed with the reconstructed lineup.
/// Recorded and skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupInconsistency {
    pub event_id: i64,
    pub team_id: Option<i64>,
    pub player_id: Option<i64>,
    pub kind: InconsistencyKind,
}

impl fmt::Display for LineupInconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "event {}: {} (team {:?}, player {:?})",
            self.event_id,
            self.kind.as_str(),
            self.team_id,
            self.player_id
        )
    }
}

/// Per-game data quality summary, accumulated across every derivation stage.
///
/// `unclassified_events` counts records whose type could not be resolved at
/// all; `other_events` counts records that classified cleanly but carry a
/// type the lineup/box/shot passes do not consume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameDiagnostics {
    pub game_id: i64,
    pub unclassified_events: u32,
    pub other_events: u32,
    pub missing_locations: u32,
    pub unattributed_shots: u32,
    pub overfull_snapshots: u32,
    pub incomplete_bootstraps: Vec<i64>,
    pub inconsistencies: Vec<LineupInconsistency>,
}

impl GameDiagnostics {
    pub fn new(game_id: i64) -> Self {
        Self {
            game_id,
            ..Default::default()
        }
    }

    pub fn record_inconsistency(&mut self, inconsistency: LineupInconsistency) {
        log::warn!("game {}: lineup inconsistency: {inconsistency}", self.game_id);
        self.inconsistencies.push(inconsistency);
    }

    pub fn is_clean(&self) -> bool {
        self.unclassified_events == 0
            && self.missing_locations == 0
            && self.unattributed_shots == 0
            && self.overfull_snapshots == 0
            && self.incomplete_bootstraps.is_empty()
            && self.inconsistencies.is_empty()
    }
}
