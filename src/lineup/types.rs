use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Size classification of a tracked five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineupStatus {
    Ok,
    Incomplete,
    Overfull,
}

impl LineupStatus {
    pub fn of(size: usize) -> Self {
        match size.cmp(&5) {
            Ordering::Less => LineupStatus::Incomplete,
            Ordering::Equal => LineupStatus::Ok,
            Ordering::Greater => LineupStatus::Overfull,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineupStatus::Ok => "ok",
            LineupStatus::Incomplete => "incomplete",
            LineupStatus::Overfull => "overfull",
        }
    }
}

/// One team's on-floor set after the triggering event was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupSnapshot {
    pub team_id: i64,
    pub event_id: i64,
    pub event_ordinal: usize,
    pub period: u32,
    pub seconds_remaining: i64,
    pub players: BTreeSet<i64>,
    pub status: LineupStatus,
    pub bootstrapped: bool,
}

/// The seeded state a team's replay starts from: distinct participant
/// mentions accumulated before the team's first substitution, capped at five.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapLineup {
    pub team_id: i64,
    pub event_id: i64,
    pub event_ordinal: usize,
    pub period: u32,
    pub players: BTreeSet<i64>,
}

impl BootstrapLineup {
    pub fn is_complete(&self) -> bool {
        self.players.len() == 5
    }
}

/// Canonical string form of a lineup, stable across insert order.
pub fn lineup_key(players: &BTreeSet<i64>) -> String {
    players
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_buckets() {
        assert_eq!(LineupStatus::of(0), LineupStatus::Incomplete);
        assert_eq!(LineupStatus::of(4), LineupStatus::Incomplete);
        assert_eq!(LineupStatus::of(5), LineupStatus::Ok);
        assert_eq!(LineupStatus::of(6), LineupStatus::Overfull);
    }

    #[test]
    fn test_lineup_key_is_sorted_and_stable() {
        let a: BTreeSet<i64> = [30, 10, 20].into_iter().collect();
        let b: BTreeSet<i64> = [20, 30, 10].into_iter().collect();
        assert_eq!(lineup_key(&a), "10|20|30");
        assert_eq!(lineup_key(&a), lineup_key(&b));
        assert_eq!(lineup_key(&BTreeSet::new()), "");
    }
}
