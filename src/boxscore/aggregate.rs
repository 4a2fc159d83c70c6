use std::collections::HashMap;

use crate::errors::GameDiagnostics;
use crate::pbp::{Event, ShotDetail, ShotRange};

use super::types::BoxScoreLine;

/// Fold shot events into per-player lines.
///
/// Pure accumulation over the event multiset: every contribution is an
/// increment keyed by `(game, player)`, so the result is independent of feed
/// order. Shots with no resolvable shooter are tallied and skipped; missing
/// locations do not matter here.
pub fn aggregate_box_scores(
    game_id: i64,
    events: &[Event],
    diagnostics: &mut GameDiagnostics,
) -> Vec<BoxScoreLine> {
    let mut lines: HashMap<i64, BoxScoreLine> = HashMap::new();

    for event in events {
        if !event.is_shot() {
            continue;
        }
        let Some(detail) = &event.shot else {
            continue;
        };
        let Some(shooter_id) = event.shooter_id() else {
            diagnostics.unattributed_shots += 1;
            continue;
        };

        {
            let line = lines
                .entry(shooter_id)
                .or_insert_with(|| BoxScoreLine::new(game_id, shooter_id));
            if line.team_id.is_none() {
                line.team_id = event.team_id;
            }
            apply_shot(line, detail);
        }

        if detail.made && detail.assisted {
            if let Some(assister_id) = detail.assisted_by_id {
                let assister = lines
                    .entry(assister_id)
                    .or_insert_with(|| BoxScoreLine::new(game_id, assister_id));
                if assister.team_id.is_none() {
                    assister.team_id = event.team_id;
                }
                assister.assists += 1;
            }
        }
    }

    let mut result: Vec<BoxScoreLine> = lines.into_values().collect();
    result.sort_by_key(|line| line.player_id);
    result
}

fn apply_shot(line: &mut BoxScoreLine, detail: &ShotDetail) {
    let (made, attempts) = match detail.range {
        ShotRange::Rim => (&mut line.rim_made, &mut line.rim_attempts),
        ShotRange::Jumper => (&mut line.jumper_made, &mut line.jumper_attempts),
        ShotRange::ThreePointer => (&mut line.three_made, &mut line.three_attempts),
        ShotRange::FreeThrow => (&mut line.ft_made, &mut line.ft_attempts),
    };
    *attempts += 1;
    if detail.made {
        *made += 1;
        line.points += detail.range.points();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbp::EventKind;

    fn shot_event(
        feed_index: usize,
        team_id: Option<i64>,
        shooter: Option<i64>,
        made: bool,
        range: ShotRange,
        assisted_by: Option<i64>,
        location: Option<(f64, f64)>,
    ) -> Event {
        Event {
            event_id: 10 + feed_index as i64,
            game_id: 3,
            period: 1,
            seconds_remaining: 1200 - feed_index as i64,
            sequence_hint: feed_index as i64,
            feed_index,
            kind: EventKind::Shot,
            team_id,
            participant_ids: shooter.into_iter().collect(),
            shot: Some(ShotDetail {
                shooter_id: shooter,
                made,
                range,
                assisted: assisted_by.is_some(),
                assisted_by_id: assisted_by,
                location,
            }),
            play_type: Some("JumpShot".to_string()),
            play_text: String::new(),
            home_score: None,
            away_score: None,
            unclassified: false,
        }
    }

    fn fixture() -> Vec<Event> {
        vec![
            // Player 1: made three (assisted by 2), missed jumper, made rim.
            shot_event(0, Some(7), Some(1), true, ShotRange::ThreePointer, Some(2), Some((30.0, 5.0))),
            shot_event(1, Some(7), Some(1), false, ShotRange::Jumper, None, Some((15.0, 10.0))),
            shot_event(2, Some(7), Some(1), true, ShotRange::Rim, None, None),
            // Player 2: two made free throws.
            shot_event(3, Some(7), Some(2), true, ShotRange::FreeThrow, None, None),
            shot_event(4, Some(7), Some(2), true, ShotRange::FreeThrow, None, None),
            // Player 3 (other team): missed three.
            shot_event(5, Some(8), Some(3), false, ShotRange::ThreePointer, None, Some((40.0, 8.0))),
        ]
    }

    #[test]
    fn test_fold_accumulates_per_player_lines() {
        let mut diagnostics = GameDiagnostics::new(3);
        let lines = aggregate_box_scores(3, &fixture(), &mut diagnostics);

        assert_eq!(lines.len(), 3);

        let p1 = &lines[0];
        assert_eq!(p1.player_id, 1);
        assert_eq!(p1.team_id, Some(7));
        assert_eq!(p1.points, 5);
        assert_eq!(p1.three_made, 1);
        assert_eq!(p1.three_attempts, 1);
        assert_eq!(p1.jumper_attempts, 1);
        assert_eq!(p1.jumper_made, 0);
        assert_eq!(p1.rim_made, 1);
        assert_eq!(p1.field_goal_attempts(), 3);

        let p2 = &lines[1];
        assert_eq!(p2.points, 2);
        assert_eq!(p2.ft_made, 2);
        assert_eq!(p2.ft_attempts, 2);
        assert_eq!(p2.assists, 1);

        let p3 = &lines[2];
        assert_eq!(p3.team_id, Some(8));
        assert_eq!(p3.points, 0);
        assert_eq!(p3.three_attempts, 1);

        assert_eq!(diagnostics.unattributed_shots, 0);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let events = fixture();
        let mut forward_diag = GameDiagnostics::new(3);
        let forward = aggregate_box_scores(3, &events, &mut forward_diag);

        let mut shuffled: Vec<Event> = events.clone();
        shuffled.reverse();
        shuffled.swap(0, 3);
        let mut shuffled_diag = GameDiagnostics::new(3);
        let permuted = aggregate_box_scores(3, &shuffled, &mut shuffled_diag);

        assert_eq!(forward, permuted);
    }

    #[test]
    fn test_shot_with_missing_location_still_counts() {
        let events = vec![shot_event(0, Some(7), Some(1), true, ShotRange::Jumper, None, None)];
        let mut diagnostics = GameDiagnostics::new(3);
        let lines = aggregate_box_scores(3, &events, &mut diagnostics);
        assert_eq!(lines[0].jumper_made, 1);
        assert_eq!(lines[0].points, 2);
    }

    #[test]
    fn test_shot_without_shooter_is_tallied_and_skipped() {
        let events = vec![shot_event(0, Some(7), None, true, ShotRange::Jumper, None, None)];
        let mut diagnostics = GameDiagnostics::new(3);
        let lines = aggregate_box_scores(3, &events, &mut diagnostics);
        assert!(lines.is_empty());
        assert_eq!(diagnostics.unattributed_shots, 1);
    }

    #[test]
    fn test_missed_assisted_shot_credits_no_assist() {
        let events = vec![shot_event(0, Some(7), Some(1), false, ShotRange::Jumper, Some(2), None)];
        let mut diagnostics = GameDiagnostics::new(3);
        let lines = aggregate_box_scores(3, &events, &mut diagnostics);
        // Only the shooter's attempt registers; no assister line appears.
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].player_id, 1);
        assert_eq!(lines[0].assists, 0);
    }

    #[test]
    fn test_non_shot_events_are_ignored() {
        let mut event = shot_event(0, Some(7), Some(1), true, ShotRange::Jumper, None, None);
        event.kind = EventKind::Other;
        event.shot = None;
        let mut diagnostics = GameDiagnostics::new(3);
        let lines = aggregate_box_scores(3, &[event], &mut diagnostics);
        assert!(lines.is_empty());
        assert_eq!(diagnostics.unattributed_shots, 0);
    }
}
