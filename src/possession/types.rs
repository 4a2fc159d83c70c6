/// Outcome the tracker assigns to a single play. Most plays carry none;
/// the ones that do either end the possession outright or feed the
/// refinement pass (steals, offensive rebounds, non-final free throws).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionOutcome {
    MadeFg,
    MadeFt,
    MissedLastFt,
    Turnover,
    Steal,
    DefRebound,
    OffRebound,
    DeadBallRebound,
    EndPeriod,
    TechFt,
    /// Never assigned to a play. Used as the end-reason marker when a
    /// trailing free throw is merged back into a made basket.
    And1Ft,
}

impl PossessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PossessionOutcome::MadeFg => "made_fg",
            PossessionOutcome::MadeFt => "made_ft",
            PossessionOutcome::MissedLastFt => "missed_last_ft",
            PossessionOutcome::Turnover => "turnover",
            PossessionOutcome::Steal => "steal",
            PossessionOutcome::DefRebound => "def_rebound",
            PossessionOutcome::OffRebound => "off_rebound",
            PossessionOutcome::DeadBallRebound => "dead_ball_rebound",
            PossessionOutcome::EndPeriod => "end_period",
            PossessionOutcome::TechFt => "tech_ft",
            PossessionOutcome::And1Ft => "and1_ft",
        }
    }

    pub fn is_rebound(&self) -> bool {
        matches!(
            self,
            PossessionOutcome::DefRebound
                | PossessionOutcome::OffRebound
                | PossessionOutcome::DeadBallRebound
        )
    }
}

/// One tracker row per normalized event. `event_ordinal` indexes back into
/// the canonical event slice, so downstream passes read play text and clock
/// from the event rather than duplicating them here.
#[derive(Debug, Clone, PartialEq)]
pub struct PossessionEvent {
    pub event_ordinal: usize,
    pub event_id: i64,
    pub possession_id: i64,
    pub team_id: Option<i64>,
    pub outcome: Option<PossessionOutcome>,
}

/// How a possession was played, keyed off its timing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionType {
    ScramblePutback,
    SecondChance,
    IntentionalFoul,
    Transition,
    HalfCourt,
}

impl PossessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PossessionType::ScramblePutback => "scramble_putback",
            PossessionType::SecondChance => "second_chance",
            PossessionType::IntentionalFoul => "intentional_foul",
            PossessionType::Transition => "transition",
            PossessionType::HalfCourt => "half_court",
        }
    }
}

/// Classified possession summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct Possession {
    pub game_id: i64,
    pub possession_id: i64,
    pub team_id: Option<i64>,
    pub period: u32,
    pub start_seconds: i64,
    pub end_seconds: i64,
    pub raw_outcome: Option<PossessionOutcome>,
    pub refined_outcome: Option<String>,
    pub possession_type: PossessionType,
    pub has_oreb: bool,
    pub time_to_first_fga: Option<i64>,
    pub time_oreb_to_fga: Option<i64>,
    /// How the previous possession of the same period ended, or
    /// "start_of_period" for the first one.
    pub prev_ender: Option<String>,
}

impl Possession {
    pub fn duration_seconds(&self) -> i64 {
        self.start_seconds - self.end_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_strings() {
        assert_eq!(PossessionOutcome::MadeFg.as_str(), "made_fg");
        assert_eq!(PossessionOutcome::MissedLastFt.as_str(), "missed_last_ft");
        assert_eq!(PossessionOutcome::And1Ft.as_str(), "and1_ft");
    }

    #[test]
    fn test_rebound_outcomes() {
        assert!(PossessionOutcome::DefRebound.is_rebound());
        assert!(PossessionOutcome::DeadBallRebound.is_rebound());
        assert!(!PossessionOutcome::Turnover.is_rebound());
    }

    #[test]
    fn test_possession_duration() {
        let possession = Possession {
            game_id: 1,
            possession_id: 0,
            team_id: Some(10),
            period: 1,
            start_seconds: 1200,
            end_seconds: 1183,
            raw_outcome: Some(PossessionOutcome::MadeFg),
            refined_outcome: Some("made_fg".to_string()),
            possession_type: PossessionType::HalfCourt,
            has_oreb: false,
            time_to_first_fga: Some(17),
            time_oreb_to_fga: None,
            prev_ender: Some("start_of_period".to_string()),
        };
        assert_eq!(possession.duration_seconds(), 17);
    }
}
