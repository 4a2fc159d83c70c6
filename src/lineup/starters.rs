use std::collections::BTreeSet;

use super::timeline::LineupTimeline;

/// A team's derived starting five.
///
/// `complete` only holds when the bootstrap found five distinct players at a
/// period-1 event; callers decide whether to keep degraded lineups.
#[derive(Debug, Clone, PartialEq)]
pub struct StartingLineup {
    pub game_id: i64,
    pub team_id: i64,
    pub event_id: i64,
    pub players: BTreeSet<i64>,
    pub complete: bool,
}

/// The bootstrapped state at each team's first event, read straight off the
/// reconstruction.
pub fn extract_starting_lineups(game_id: i64, timeline: &LineupTimeline) -> Vec<StartingLineup> {
    timeline
        .iter()
        .map(|(&team_id, team)| StartingLineup {
            game_id,
            team_id,
            event_id: team.bootstrap.event_id,
            players: team.bootstrap.players.clone(),
            complete: team.bootstrap.is_complete() && team.bootstrap.period == 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::timeline::TeamTimeline;
    use crate::lineup::types::BootstrapLineup;

    fn timeline_with(period: u32, players: &[i64]) -> LineupTimeline {
        let mut timeline = LineupTimeline::default();
        timeline.insert_team(
            4,
            TeamTimeline {
                bootstrap: BootstrapLineup {
                    team_id: 4,
                    event_id: 900,
                    event_ordinal: 0,
                    period,
                    players: players.iter().copied().collect(),
                },
                snapshots: Vec::new(),
            },
        );
        timeline
    }

    #[test]
    fn test_full_period_one_bootstrap_is_complete() {
        let starters = extract_starting_lineups(77, &timeline_with(1, &[1, 2, 3, 4, 5]));
        assert_eq!(starters.len(), 1);
        assert_eq!(starters[0].game_id, 77);
        assert_eq!(starters[0].team_id, 4);
        assert_eq!(starters[0].event_id, 900);
        assert!(starters[0].complete);
    }

    #[test]
    fn test_short_bootstrap_is_flagged() {
        let starters = extract_starting_lineups(77, &timeline_with(1, &[1, 2, 3]));
        assert!(!starters[0].complete);
        assert_eq!(starters[0].players.len(), 3);
    }

    #[test]
    fn test_bootstrap_outside_period_one_is_flagged() {
        let starters = extract_starting_lineups(77, &timeline_with(2, &[1, 2, 3, 4, 5]));
        assert!(!starters[0].complete);
    }
}
