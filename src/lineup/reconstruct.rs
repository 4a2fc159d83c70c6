use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{GameDiagnostics, InconsistencyKind, LineupInconsistency};
use crate::pbp::{Event, EventKind};

use super::timeline::{LineupTimeline, TeamTimeline};
use super::types::{BootstrapLineup, LineupSnapshot, LineupStatus};

/// Rebuild per-team lineups by replaying canonically ordered events.
///
/// Each team's state is seeded from participant mentions ahead of its first
/// substitution, then substitutions mutate it one event at a time. A
/// snapshot is emitted at the seed point and after every substitution, so
/// consecutive snapshots never differ by more than one event's moves.
/// Contradictory substitutions are recorded on `diagnostics` and skipped;
/// reconstruction itself never fails.
pub fn reconstruct_lineups(events: &[Event], diagnostics: &mut GameDiagnostics) -> LineupTimeline {
    let team_ids = observed_team_ids(events);

    let mut states: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
    let mut timelines: BTreeMap<i64, TeamTimeline> = BTreeMap::new();
    for &team_id in &team_ids {
        let bootstrap = bootstrap_team(events, team_id);
        if !bootstrap.is_complete() {
            diagnostics.incomplete_bootstraps.push(team_id);
        }
        states.insert(team_id, bootstrap.players.clone());
        timelines.insert(
            team_id,
            TeamTimeline {
                bootstrap,
                snapshots: Vec::new(),
            },
        );
    }

    for (ordinal, event) in events.iter().enumerate() {
        let Some(team_id) = event.team_id else {
            if event.is_substitution() {
                diagnostics.record_inconsistency(LineupInconsistency {
                    event_id: event.event_id,
                    team_id: None,
                    player_id: event.primary_participant(),
                    kind: InconsistencyKind::MissingTeam,
                });
            }
            continue;
        };
        let (Some(timeline), Some(state)) =
            (timelines.get_mut(&team_id), states.get_mut(&team_id))
        else {
            continue;
        };

        if ordinal == timeline.bootstrap.event_ordinal && !event.is_substitution() {
            timeline.snapshots.push(LineupSnapshot {
                team_id,
                event_id: event.event_id,
                event_ordinal: ordinal,
                period: event.period,
                seconds_remaining: event.seconds_remaining,
                players: state.clone(),
                status: LineupStatus::of(state.len()),
                bootstrapped: true,
            });
        }

        if event.is_substitution() {
            let before = LineupStatus::of(state.len());
            apply_substitution(event, state, diagnostics);
            let status = LineupStatus::of(state.len());
            if status == LineupStatus::Overfull && before != LineupStatus::Overfull {
                diagnostics.overfull_snapshots += 1;
            }
            timeline.snapshots.push(LineupSnapshot {
                team_id,
                event_id: event.event_id,
                event_ordinal: ordinal,
                period: event.period,
                seconds_remaining: event.seconds_remaining,
                players: state.clone(),
                status,
                bootstrapped: false,
            });
        }
    }

    let mut result = LineupTimeline::default();
    for (team_id, timeline) in timelines {
        result.insert_team(team_id, timeline);
    }
    result
}

fn observed_team_ids(events: &[Event]) -> Vec<i64> {
    let mut team_ids = Vec::new();
    for event in events {
        if let Some(team_id) = event.team_id {
            if !team_ids.contains(&team_id) {
                team_ids.push(team_id);
            }
        }
    }
    team_ids
}

/// Accumulate distinct participant mentions for a team until five are seen
/// or its first substitution closes the window. A team whose feed opens with
/// substitutions seeds empty.
fn bootstrap_team(events: &[Event], team_id: i64) -> BootstrapLineup {
    let mut players = BTreeSet::new();
    let mut first: Option<(usize, &Event)> = None;
    for (ordinal, event) in events.iter().enumerate() {
        if event.team_id != Some(team_id) {
            continue;
        }
        if first.is_none() {
            first = Some((ordinal, event));
        }
        if event.is_substitution() {
            break;
        }
        for &player_id in &event.participant_ids {
            if players.len() == 5 {
                break;
            }
            players.insert(player_id);
        }
        if players.len() == 5 {
            break;
        }
    }
    // A team id only gets here by appearing in some event.
    let (event_ordinal, event) = match first {
        Some(found) => found,
        None => (0, &events[0]),
    };
    BootstrapLineup {
        team_id,
        event_id: event.event_id,
        event_ordinal,
        period: event.period,
        players,
    }
}

fn apply_substitution(
    event: &Event,
    state: &mut BTreeSet<i64>,
    diagnostics: &mut GameDiagnostics,
) {
    let Some(player_id) = event.primary_participant() else {
        diagnostics.record_inconsistency(LineupInconsistency {
            event_id: event.event_id,
            team_id: event.team_id,
            player_id: None,
            kind: InconsistencyKind::MissingPlayer,
        });
        return;
    };
    match event.kind {
        EventKind::SubstitutionIn => {
            if !state.insert(player_id) {
                diagnostics.record_inconsistency(LineupInconsistency {
                    event_id: event.event_id,
                    team_id: event.team_id,
                    player_id: Some(player_id),
                    kind: InconsistencyKind::AddPresent,
                });
            }
        }
        EventKind::SubstitutionOut => {
            if !state.remove(&player_id) {
                diagnostics.record_inconsistency(LineupInconsistency {
                    event_id: event.event_id,
                    team_id: event.team_id,
                    player_id: Some(player_id),
                    kind: InconsistencyKind::RemoveAbsent,
                });
            }
        }
        _ => {}
    }
}
