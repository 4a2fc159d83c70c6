use std::cmp::Reverse;

/// Play types the feed uses for field goal attempts.
pub const FIELD_GOAL_TYPES: [&str; 4] = ["JumpShot", "LayUpShot", "DunkShot", "TipShot"];

/// Shot distance bucket. Missing ranges are resolved at normalization time,
/// so every shot carries a defined point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotRange {
    Rim,
    Jumper,
    ThreePointer,
    FreeThrow,
}

impl ShotRange {
    pub fn points(&self) -> u32 {
        match self {
            ShotRange::Rim | ShotRange::Jumper => 2,
            ShotRange::ThreePointer => 3,
            ShotRange::FreeThrow => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotRange::Rim => "rim",
            ShotRange::Jumper => "jumper",
            ShotRange::ThreePointer => "three_pointer",
            ShotRange::FreeThrow => "free_throw",
        }
    }

    pub fn is_three(&self) -> bool {
        matches!(self, ShotRange::ThreePointer)
    }

    pub fn is_free_throw(&self) -> bool {
        matches!(self, ShotRange::FreeThrow)
    }
}

/// Shot payload attached to shot events.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotDetail {
    pub shooter_id: Option<i64>,
    pub made: bool,
    pub range: ShotRange,
    pub assisted: bool,
    pub assisted_by_id: Option<i64>,
    pub location: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SubstitutionIn,
    SubstitutionOut,
    Shot,
    Other,
}

/// One normalized play.
///
/// The raw `play_type`/`play_text` strings ride along because the possession
/// and four-factor passes key off feed vocabulary (rebound kinds, turnovers,
/// fouls) that the typed kind deliberately does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_id: i64,
    pub game_id: i64,
    pub period: u32,
    pub seconds_remaining: i64,
    pub sequence_hint: i64,
    pub feed_index: usize,
    pub kind: EventKind,
    pub team_id: Option<i64>,
    pub participant_ids: Vec<i64>,
    pub shot: Option<ShotDetail>,
    pub play_type: Option<String>,
    pub play_text: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub unclassified: bool,
}

impl Event {
    /// Canonical ordering: period ascending, clock descending (more seconds
    /// remaining comes first), then sequence hint, then feed position.
    pub fn sort_key(&self) -> (u32, Reverse<i64>, i64, usize) {
        (
            self.period,
            Reverse(self.seconds_remaining),
            self.sequence_hint,
            self.feed_index,
        )
    }

    pub fn is_substitution(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubstitutionIn | EventKind::SubstitutionOut
        )
    }

    pub fn is_shot(&self) -> bool {
        self.kind == EventKind::Shot
    }

    pub fn type_is(&self, play_type: &str) -> bool {
        self.play_type.as_deref() == Some(play_type)
    }

    pub fn type_contains(&self, needle: &str) -> bool {
        self.play_type
            .as_deref()
            .map(|t| t.contains(needle))
            .unwrap_or(false)
    }

    pub fn text_contains(&self, needle: &str) -> bool {
        self.play_text.to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn is_field_goal_attempt(&self) -> bool {
        self.play_type
            .as_deref()
            .map(|t| FIELD_GOAL_TYPES.contains(&t))
            .unwrap_or(false)
    }

    /// Made/missed for any play, preferring the typed shot payload and
    /// falling back to the text phrasing.
    pub fn made_shot(&self) -> bool {
        match &self.shot {
            Some(detail) => detail.made,
            None => made_from_text(&self.play_text),
        }
    }

    pub fn shooter_id(&self) -> Option<i64> {
        self.shot
            .as_ref()
            .and_then(|s| s.shooter_id)
            .or_else(|| self.primary_participant())
    }

    pub fn primary_participant(&self) -> Option<i64> {
        self.participant_ids.first().copied()
    }
}

/// Feed phrasing for a converted attempt: "makes" for field goals, past-tense
/// "made" for free throws. "missed" wins over a stray "made".
pub fn made_from_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("makes") || (lower.contains(" made ") && !lower.contains("missed"))
}

/// Feed phrasing for a failed attempt, either tense.
pub fn missed_from_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("misses") || lower.contains("missed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(period: u32, seconds: i64, hint: i64, index: usize) -> Event {
        Event {
            event_id: hint,
            game_id: 1,
            period,
            seconds_remaining: seconds,
            sequence_hint: hint,
            feed_index: index,
            kind: EventKind::Other,
            team_id: None,
            participant_ids: vec![],
            shot: None,
            play_type: None,
            play_text: String::new(),
            home_score: None,
            away_score: None,
            unclassified: false,
        }
    }

    #[test]
    fn test_sort_key_orders_periods_then_clock_desc() {
        let mut events = vec![
            event(2, 1200, 1, 0),
            event(1, 30, 2, 1),
            event(1, 900, 3, 2),
        ];
        events.sort_by_key(|e| e.sort_key());
        let clocks: Vec<(u32, i64)> = events
            .iter()
            .map(|e| (e.period, e.seconds_remaining))
            .collect();
        assert_eq!(clocks, vec![(1, 900), (1, 30), (2, 1200)]);
    }

    #[test]
    fn test_sort_key_breaks_clock_ties_by_hint_then_feed_order() {
        let mut events = vec![
            event(1, 600, 9, 0),
            event(1, 600, 4, 1),
            event(1, 600, 4, 2),
        ];
        // Same key as index 2 but earlier in the feed.
        events[1].event_id = 100;
        events[2].event_id = 200;
        events.sort_by_key(|e| e.sort_key());
        assert_eq!(events[0].event_id, 100);
        assert_eq!(events[1].event_id, 200);
        assert_eq!(events[2].event_id, 9);
    }

    #[test]
    fn test_made_from_text() {
        assert!(made_from_text("Alice makes a three point jumper"));
        assert!(made_from_text("Bob made Free Throw 1 of 2"));
        assert!(!made_from_text("Alice missed a jumper"));
        assert!(!made_from_text("Foul on Bob"));
    }

    #[test]
    fn test_missed_from_text() {
        assert!(missed_from_text("Alice misses a layup"));
        assert!(missed_from_text("Bob missed Free Throw 1 of 2"));
        assert!(!missed_from_text("Alice makes a layup"));
    }

    #[test]
    fn test_shot_range_points() {
        assert_eq!(ShotRange::Rim.points(), 2);
        assert_eq!(ShotRange::Jumper.points(), 2);
        assert_eq!(ShotRange::ThreePointer.points(), 3);
        assert_eq!(ShotRange::FreeThrow.points(), 1);
    }
}
