use crate::domain::GameMeta;
use crate::errors::GameDiagnostics;
use crate::lineup::LineupTimeline;
use crate::pbp::Event;

use super::types::ShotRecord;

/// One record per located shot, with both lineups joined as of the shot's
/// position in the event order.
///
/// Shots without coordinates are excluded and tallied; they still count in
/// the box score. Shots that cannot be pinned to a team are tallied as
/// unattributed. Lineup joins degrade to empty lists rather than dropping
/// the shot when a side has no reconstruction.
pub fn extract_shot_chart(
    meta: &GameMeta,
    events: &[Event],
    timeline: &LineupTimeline,
    diagnostics: &mut GameDiagnostics,
) -> Vec<ShotRecord> {
    let mut records = Vec::new();
    for (ordinal, event) in events.iter().enumerate() {
        if !event.is_shot() {
            continue;
        }
        let Some(detail) = &event.shot else {
            continue;
        };
        let Some((x, y)) = detail.location else {
            diagnostics.missing_locations += 1;
            continue;
        };
        let Some(shooter_id) = event.shooter_id() else {
            // Already tallied by the box-score fold.
            continue;
        };
        let Some(team_id) = event.team_id else {
            diagnostics.unattributed_shots += 1;
            continue;
        };

        let opponent_id = meta.opponent_of(team_id);
        records.push(ShotRecord {
            game_id: meta.id,
            event_id: event.event_id,
            team_id,
            shooter_id,
            period: event.period,
            seconds_remaining: event.seconds_remaining,
            made: detail.made,
            range: detail.range,
            assisted: detail.assisted,
            assisted_by_id: detail.assisted_by_id,
            x,
            y,
            teammates: on_floor(timeline, team_id, ordinal),
            opponents: on_floor(timeline, opponent_id, ordinal),
        });
    }
    records
}

fn on_floor(timeline: &LineupTimeline, team_id: i64, ordinal: usize) -> Vec<i64> {
    timeline
        .lineup_as_of(team_id, ordinal)
        .map(|players| players.iter().copied().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::reconstruct_lineups;
    use crate::pbp::{EventKind, ShotDetail, ShotRange};

    fn meta() -> GameMeta {
        GameMeta {
            id: 55,
            season: 2025,
            start_date: None,
            status: None,
            home_team_id: 1,
            home_team: "Home".to_string(),
            away_team_id: 2,
            away_team: "Away".to_string(),
        }
    }

    fn event(
        kind: EventKind,
        team_id: Option<i64>,
        participants: &[i64],
        seconds: i64,
        feed_index: usize,
    ) -> Event {
        Event {
            event_id: 300 + feed_index as i64,
            game_id: 55,
            period: 1,
            seconds_remaining: seconds,
            sequence_hint: feed_index as i64,
            feed_index,
            kind,
            team_id,
            participant_ids: participants.to_vec(),
            shot: None,
            play_type: None,
            play_text: String::new(),
            home_score: None,
            away_score: None,
            unclassified: false,
        }
    }

    fn with_shot(mut e: Event, made: bool, location: Option<(f64, f64)>) -> Event {
        e.shot = Some(ShotDetail {
            shooter_id: e.participant_ids.first().copied(),
            made,
            range: ShotRange::Jumper,
            assisted: false,
            assisted_by_id: None,
            location,
        });
        e
    }

    fn fixture() -> Vec<Event> {
        let mut events = vec![
            event(EventKind::Other, Some(1), &[11, 12, 13, 14, 15], 1200, 0),
            event(EventKind::Other, Some(2), &[21, 22, 23, 24, 25], 1195, 1),
            event(EventKind::SubstitutionOut, Some(1), &[11], 900, 2),
            event(EventKind::SubstitutionIn, Some(1), &[16], 900, 3),
        ];
        events.push(with_shot(
            event(EventKind::Shot, Some(1), &[12], 700, 4),
            true,
            Some((22.0, 9.0)),
        ));
        events.push(with_shot(
            event(EventKind::Shot, Some(2), &[21], 600, 5),
            false,
            None,
        ));
        events
    }

    #[test]
    fn test_located_shot_joins_both_current_lineups() {
        let events = fixture();
        let mut diagnostics = GameDiagnostics::new(55);
        let timeline = reconstruct_lineups(&events, &mut diagnostics);
        let records = extract_shot_chart(&meta(), &events, &timeline, &mut diagnostics);

        assert_eq!(records.len(), 1);
        let shot = &records[0];
        assert_eq!(shot.shooter_id, 12);
        assert_eq!(shot.team_id, 1);
        assert!(shot.made);
        assert_eq!((shot.x, shot.y), (22.0, 9.0));
        // Post-substitution five for the shooter's side, untouched five for
        // the defense, both in ascending id order.
        assert_eq!(shot.teammates, vec![12, 13, 14, 15, 16]);
        assert_eq!(shot.opponents, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_unlocated_shot_is_excluded_and_tallied() {
        let events = fixture();
        let mut diagnostics = GameDiagnostics::new(55);
        let timeline = reconstruct_lineups(&events, &mut diagnostics);
        let records = extract_shot_chart(&meta(), &events, &timeline, &mut diagnostics);

        assert!(records.iter().all(|r| r.shooter_id != 21));
        assert_eq!(diagnostics.missing_locations, 1);
    }

    #[test]
    fn test_shot_without_team_is_tallied_as_unattributed() {
        let events = vec![with_shot(
            event(EventKind::Shot, None, &[12], 700, 0),
            true,
            Some((22.0, 9.0)),
        )];
        let mut diagnostics = GameDiagnostics::new(55);
        let timeline = reconstruct_lineups(&events, &mut diagnostics);
        let records = extract_shot_chart(&meta(), &events, &timeline, &mut diagnostics);

        assert!(records.is_empty());
        assert_eq!(diagnostics.unattributed_shots, 1);
        assert_eq!(diagnostics.missing_locations, 0);
    }

    #[test]
    fn test_missing_reconstruction_degrades_to_empty_lineups() {
        // Only the shot itself in the feed: the shooter's side has a
        // single-mention bootstrap, the defense has nothing at all.
        let events = vec![with_shot(
            event(EventKind::Shot, Some(1), &[12], 700, 0),
            true,
            Some((22.0, 9.0)),
        )];
        let mut diagnostics = GameDiagnostics::new(55);
        let timeline = reconstruct_lineups(&events, &mut diagnostics);
        let records = extract_shot_chart(&meta(), &events, &timeline, &mut diagnostics);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].teammates, vec![12]);
        assert!(records[0].opponents.is_empty());
    }
}
