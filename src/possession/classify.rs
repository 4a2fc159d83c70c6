use std::collections::BTreeMap;

use super::types::{Possession, PossessionEvent, PossessionOutcome, PossessionType};
use crate::pbp::{missed_from_text, Event};

/// Rolls tracker records up into one classified row per possession.
///
/// The raw outcome is the last play-level outcome in the group. Refinement
/// splits turnovers by whether a steal preceded them, tags defensive rebounds
/// with the kind of miss they cleaned up, and spots blocked shots that went
/// out of bounds. End-of-period groups are tracking artifacts and are
/// dropped from the output.
pub fn classify_possessions(
    game_id: i64,
    events: &[Event],
    records: &[PossessionEvent],
) -> Vec<Possession> {
    let mut groups: BTreeMap<i64, Vec<&PossessionEvent>> = BTreeMap::new();
    for record in records {
        groups.entry(record.possession_id).or_default().push(record);
    }

    let mut rows: Vec<Possession> = Vec::with_capacity(groups.len());
    for (&possession_id, plays) in &groups {
        let first_event = &events[plays[0].event_ordinal];
        let last_ordinal = plays[plays.len() - 1].event_ordinal;
        let start_seconds = first_event.seconds_remaining;
        let end_seconds = events[last_ordinal].seconds_remaining;

        let outcomes: Vec<PossessionOutcome> = plays.iter().filter_map(|p| p.outcome).collect();
        let raw_outcome = outcomes.last().copied();
        let has_steal = outcomes.contains(&PossessionOutcome::Steal);
        let has_oreb = outcomes.contains(&PossessionOutcome::OffRebound);

        let mut refined_outcome = match raw_outcome {
            Some(PossessionOutcome::Turnover) => {
                let kind = if has_steal {
                    "live_ball_turnover"
                } else {
                    "dead_ball_turnover"
                };
                Some(kind.to_string())
            }
            Some(PossessionOutcome::DefRebound) => {
                Some(format!("{}_def_rebound", rebounded_miss_kind(events, plays)))
            }
            Some(outcome) => Some(outcome.as_str().to_string()),
            None => None,
        };

        // A blocked miss with no rebound before the possession flips went
        // out of bounds off the shooter.
        for (index, play) in plays.iter().enumerate() {
            let event = &events[play.event_ordinal];
            if event.is_field_goal_attempt()
                && event.text_contains("block")
                && missed_from_text(&event.play_text)
            {
                let rebounded = plays[index + 1..]
                    .iter()
                    .any(|later| later.outcome.is_some_and(|o| o.is_rebound()));
                if !rebounded && groups.contains_key(&(possession_id + 1)) {
                    refined_outcome = Some("block_oob".to_string());
                }
                break;
            }
        }

        let attempt_seconds: Vec<i64> = plays
            .iter()
            .map(|p| &events[p.event_ordinal])
            .filter(|e| e.is_field_goal_attempt())
            .map(|e| e.seconds_remaining)
            .collect();
        let time_to_first_fga = attempt_seconds.first().map(|&s| start_seconds - s);

        let mut time_oreb_to_fga = None;
        if let Some(oreb) = plays
            .iter()
            .find(|p| p.outcome == Some(PossessionOutcome::OffRebound))
        {
            let oreb_seconds = events[oreb.event_ordinal].seconds_remaining;
            if let Some(&putback) = attempt_seconds.iter().find(|&&s| s < oreb_seconds) {
                time_oreb_to_fga = Some(oreb_seconds - putback);
            }
        }

        // Non-shooting fouls: shooting fouls are part of the attempt, not a
        // separate defensive act.
        let foul_seconds: Vec<i64> = plays
            .iter()
            .map(|p| &events[p.event_ordinal])
            .filter(|e| e.type_contains("Foul") && !e.text_contains("shooting"))
            .map(|e| e.seconds_remaining)
            .collect();
        let early_foul = foul_seconds
            .first()
            .map(|&s| start_seconds - s <= 10)
            .unwrap_or(false);

        let possession_type = if has_oreb {
            if time_oreb_to_fga.is_some_and(|t| t <= 3) {
                PossessionType::ScramblePutback
            } else {
                PossessionType::SecondChance
            }
        } else if !foul_seconds.is_empty()
            && early_foul
            && attempt_seconds.is_empty()
            && start_seconds <= 120
        {
            PossessionType::IntentionalFoul
        } else if let Some(elapsed) = time_to_first_fga {
            if elapsed <= 7 {
                PossessionType::Transition
            } else {
                PossessionType::HalfCourt
            }
        } else {
            PossessionType::HalfCourt
        };

        rows.push(Possession {
            game_id,
            possession_id,
            team_id: plays[0].team_id,
            period: first_event.period,
            start_seconds,
            end_seconds,
            raw_outcome,
            refined_outcome,
            possession_type,
            has_oreb,
            time_to_first_fga,
            time_oreb_to_fga,
            prev_ender: None,
        });
    }

    let mut result: Vec<Possession> = rows
        .into_iter()
        .filter(|p| p.raw_outcome != Some(PossessionOutcome::EndPeriod))
        .collect();

    let mut prev_period: Option<u32> = None;
    let mut prev_refined: Option<String> = None;
    for possession in result.iter_mut() {
        possession.prev_ender = match prev_period {
            Some(period) if period == possession.period => prev_refined.clone(),
            _ => Some("start_of_period".to_string()),
        };
        prev_period = Some(possession.period);
        prev_refined = possession.refined_outcome.clone();
    }

    result
}

/// Walk back from the defensive rebound to the miss it cleaned up.
fn rebounded_miss_kind(events: &[Event], plays: &[&PossessionEvent]) -> &'static str {
    let mut found_rebound = false;
    for play in plays.iter().rev() {
        if !found_rebound {
            if play.outcome == Some(PossessionOutcome::DefRebound) {
                found_rebound = true;
            }
            continue;
        }
        let event = &events[play.event_ordinal];
        if event.is_field_goal_attempt() {
            return "fga";
        }
        if event.type_is("MadeFreeThrow") && missed_from_text(&event.play_text) {
            return "fta";
        }
    }
    "fga"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbp::EventKind;
    use crate::possession::tracker::track_possessions;

    const TEAM_A: i64 = 10;
    const TEAM_B: i64 = 20;

    fn event(
        ordinal: usize,
        period: u32,
        seconds: i64,
        team: Option<i64>,
        play_type: &str,
        text: &str,
    ) -> Event {
        Event {
            event_id: ordinal as i64,
            game_id: 77,
            period,
            seconds_remaining: seconds,
            sequence_hint: ordinal as i64,
            feed_index: ordinal,
            kind: EventKind::Other,
            team_id: team,
            participant_ids: vec![],
            shot: None,
            play_type: if play_type.is_empty() {
                None
            } else {
                Some(play_type.to_string())
            },
            play_text: text.to_string(),
            home_score: None,
            away_score: None,
            unclassified: false,
        }
    }

    fn classify(events: &[Event]) -> Vec<Possession> {
        let records = track_possessions(events).unwrap();
        classify_possessions(77, events, &records)
    }

    #[test]
    fn test_refined_outcomes_and_prev_ender_chain() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(1, 1, 1195, Some(TEAM_A), "JumpShot", "Alice makes a jumper"),
            event(2, 1, 1170, Some(TEAM_B), "JumpShot", "Bob misses a jumper"),
            event(3, 1, 1168, Some(TEAM_A), "Defensive Rebound", "Alice defensive rebound"),
            event(4, 1, 1150, Some(TEAM_A), "LostBallTurnover", "Alice loses the ball"),
            event(5, 1, 1130, Some(TEAM_B), "LayUpShot", "Bob makes a layup"),
            event(6, 1, 0, None, "End Period", "End of 1st half"),
        ];
        let possessions = classify(&events);

        // The end-of-period group is dropped.
        assert_eq!(possessions.len(), 4);
        assert_eq!(
            possessions[0].refined_outcome.as_deref(),
            Some("made_fg")
        );
        assert_eq!(
            possessions[1].refined_outcome.as_deref(),
            Some("fga_def_rebound")
        );
        assert_eq!(
            possessions[2].refined_outcome.as_deref(),
            Some("dead_ball_turnover")
        );
        assert_eq!(
            possessions[3].refined_outcome.as_deref(),
            Some("made_fg")
        );

        assert_eq!(possessions[0].prev_ender.as_deref(), Some("start_of_period"));
        assert_eq!(possessions[1].prev_ender.as_deref(), Some("made_fg"));
        assert_eq!(possessions[2].prev_ender.as_deref(), Some("fga_def_rebound"));
        assert_eq!(possessions[3].prev_ender.as_deref(), Some("dead_ball_turnover"));

        assert_eq!(possessions[0].team_id, Some(TEAM_A));
        assert_eq!(possessions[3].team_id, Some(TEAM_B));
    }

    #[test]
    fn test_steal_before_turnover_is_live_ball() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(1, 1, 1180, Some(TEAM_B), "Steal", "Bob steal"),
            event(2, 1, 1180, Some(TEAM_A), "LostBallTurnover", "Alice loses the ball"),
            event(3, 1, 1175, Some(TEAM_B), "LayUpShot", "Bob makes a layup"),
        ];
        let possessions = classify(&events);
        assert_eq!(
            possessions[0].refined_outcome.as_deref(),
            Some("live_ball_turnover")
        );
    }

    #[test]
    fn test_free_throw_miss_rebound_is_fta_def_rebound() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(1, 1, 1100, Some(TEAM_B), "PersonalFoul", "Foul on Bob"),
            event(
                2,
                1,
                1100,
                Some(TEAM_A),
                "MadeFreeThrow",
                "Alice missed Free Throw 1 of 1",
            ),
            event(3, 1, 1098, Some(TEAM_B), "Defensive Rebound", "Bob defensive rebound"),
        ];
        let possessions = classify(&events);
        assert_eq!(
            possessions[0].refined_outcome.as_deref(),
            Some("fta_def_rebound")
        );
        assert_eq!(possessions[0].raw_outcome, Some(PossessionOutcome::DefRebound));
    }

    #[test]
    fn test_blocked_shot_out_of_bounds() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(
                1,
                1,
                1180,
                Some(TEAM_A),
                "JumpShot",
                "Alice misses a layup, blocked by Bob",
            ),
            event(
                2,
                1,
                1178,
                Some(TEAM_A),
                "OutOfBoundsTurnover",
                "Ball out of bounds off Alice",
            ),
            event(3, 1, 1160, Some(TEAM_B), "JumpShot", "Bob makes a jumper"),
        ];
        let possessions = classify(&events);
        assert_eq!(possessions[0].refined_outcome.as_deref(), Some("block_oob"));
    }

    #[test]
    fn test_blocked_shot_with_rebound_keeps_refinement() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(
                1,
                1,
                1180,
                Some(TEAM_A),
                "JumpShot",
                "Alice misses a layup, blocked by Bob",
            ),
            event(2, 1, 1178, Some(TEAM_B), "Defensive Rebound", "Bob defensive rebound"),
            event(3, 1, 1160, Some(TEAM_B), "JumpShot", "Bob makes a jumper"),
        ];
        let possessions = classify(&events);
        assert_eq!(
            possessions[0].refined_outcome.as_deref(),
            Some("fga_def_rebound")
        );
    }

    #[test]
    fn test_scramble_putback_and_second_chance() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(1, 1, 1000, Some(TEAM_A), "JumpShot", "Alice misses a jumper"),
            event(2, 1, 998, Some(TEAM_A), "Offensive Rebound", "Alice offensive rebound"),
            event(3, 1, 996, Some(TEAM_A), "TipShot", "Alice makes a tip shot"),
            event(4, 1, 900, Some(TEAM_B), "JumpShot", "Bob misses a jumper"),
            event(5, 1, 898, Some(TEAM_B), "Offensive Rebound", "Bob offensive rebound"),
            event(6, 1, 880, Some(TEAM_B), "JumpShot", "Bob makes a jumper"),
        ];
        let possessions = classify(&events);
        assert!(possessions[0].has_oreb);
        assert_eq!(possessions[0].time_oreb_to_fga, Some(2));
        assert_eq!(
            possessions[0].possession_type,
            PossessionType::ScramblePutback
        );
        assert_eq!(possessions[1].time_oreb_to_fga, Some(18));
        assert_eq!(possessions[1].possession_type, PossessionType::SecondChance);
    }

    #[test]
    fn test_intentional_foul_late_in_game() {
        let events = vec![
            event(0, 2, 40, Some(TEAM_A), "JumpShot", "Alice makes a jumper"),
            event(1, 2, 35, Some(TEAM_A), "PersonalFoul", "Foul on Alice"),
            event(
                2,
                2,
                35,
                Some(TEAM_B),
                "MadeFreeThrow",
                "Bob made Free Throw 1 of 2",
            ),
            event(
                3,
                2,
                35,
                Some(TEAM_B),
                "MadeFreeThrow",
                "Bob made Free Throw 2 of 2",
            ),
        ];
        let possessions = classify(&events);
        assert_eq!(possessions[1].possession_type, PossessionType::IntentionalFoul);
        assert_eq!(possessions[1].refined_outcome.as_deref(), Some("made_ft"));
    }

    #[test]
    fn test_transition_and_half_court_split() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(1, 1, 1194, Some(TEAM_A), "LayUpShot", "Alice makes a layup"),
            event(2, 1, 1170, Some(TEAM_B), "JumpShot", "Bob makes a jumper"),
            event(3, 1, 1160, None, "Substitution", "Carol subbing in for State"),
            event(4, 1, 1140, Some(TEAM_A), "JumpShot", "Alice makes a jumper"),
        ];
        let possessions = classify(&events);
        assert_eq!(possessions[0].time_to_first_fga, Some(6));
        assert_eq!(possessions[0].possession_type, PossessionType::Transition);
        // Second possession starts at the shot itself after a scored basket,
        // elapsed time is zero.
        assert_eq!(possessions[1].possession_type, PossessionType::Transition);
        // Third possession opens with a substitution, the shot comes 20
        // seconds later.
        assert_eq!(possessions[2].time_to_first_fga, Some(20));
        assert_eq!(possessions[2].possession_type, PossessionType::HalfCourt);
    }

    #[test]
    fn test_trailing_rows_form_open_possession() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(1, 1, 1194, Some(TEAM_A), "LayUpShot", "Alice makes a layup"),
            event(2, 1, 1190, None, "Substitution", "Bob subbing in for State"),
        ];
        let possessions = classify(&events);
        assert_eq!(possessions.len(), 2);
        assert_eq!(possessions[1].raw_outcome, None);
        assert_eq!(possessions[1].refined_outcome, None);
        assert_eq!(possessions[1].possession_type, PossessionType::HalfCourt);
    }

    #[test]
    fn test_prev_ender_resets_each_period() {
        let events = vec![
            event(0, 1, 1200, Some(TEAM_A), "Jumpball", "Alice won the tip"),
            event(1, 1, 1190, Some(TEAM_A), "JumpShot", "Alice makes a jumper"),
            event(2, 1, 0, None, "End Period", "End of 1st half"),
            event(3, 2, 1190, Some(TEAM_B), "JumpShot", "Bob makes a jumper"),
        ];
        let possessions = classify(&events);
        assert_eq!(possessions.len(), 2);
        assert_eq!(possessions[0].period, 1);
        assert_eq!(possessions[1].period, 2);
        assert_eq!(possessions[1].prev_ender.as_deref(), Some("start_of_period"));
    }
}
