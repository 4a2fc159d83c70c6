use anyhow::Result;
use log::debug;

use crate::boxscore::{aggregate_box_scores, BoxScoreLine};
use crate::domain::{GameMeta, PlayResponse};
use crate::errors::GameDiagnostics;
use crate::four_factors::{compute_four_factors, TeamFactors};
use crate::lineup::{
    build_lineup_stints, extract_starting_lineups, reconstruct_lineups, LineupStint,
    LineupTimeline, StartingLineup,
};
use crate::pbp::{normalize_game, Event, PlayClassifier};
use crate::possession::{
    classify_possessions, track_possessions, Possession, PossessionEvent,
};
use crate::shotchart::{extract_shot_chart, ShotRecord};

/// Everything derived from one game's feed, ready for storage.
#[derive(Debug)]
pub struct GameOutputs {
    pub meta: GameMeta,
    pub events: Vec<Event>,
    pub timeline: LineupTimeline,
    pub starting_lineups: Vec<StartingLineup>,
    pub box_scores: Vec<BoxScoreLine>,
    pub shots: Vec<ShotRecord>,
    pub stints: Vec<LineupStint>,
    pub possession_events: Vec<PossessionEvent>,
    pub possessions: Vec<Possession>,
    pub four_factors: Vec<TeamFactors>,
    pub diagnostics: GameDiagnostics,
}

/// Full per-game analysis: normalize the feed, reconstruct lineups, then
/// derive starters, box scores, the shot chart, stints, possessions and
/// four factors from the same event sequence.
///
/// Pure with respect to its inputs. The canonical event ordering makes the
/// result independent of the order the feed delivered its rows, so running
/// a game twice produces identical outputs.
pub fn process_game(
    meta: &GameMeta,
    plays: &[PlayResponse],
    classifier: &dyn PlayClassifier,
) -> Result<GameOutputs> {
    let mut diagnostics = GameDiagnostics::new(meta.id);
    let events = normalize_game(meta, plays, classifier, &mut diagnostics)?;
    let timeline = reconstruct_lineups(&events, &mut diagnostics);
    let starting_lineups = extract_starting_lineups(meta.id, &timeline);
    let box_scores = aggregate_box_scores(meta.id, &events, &mut diagnostics);
    let shots = extract_shot_chart(meta, &events, &timeline, &mut diagnostics);
    let stints = build_lineup_stints(meta, &events, &timeline);
    let possession_events = track_possessions(&events)?;
    let possessions = classify_possessions(meta.id, &events, &possession_events);
    let four_factors = compute_four_factors(meta.id, &events);

    debug!(
        "Game {}: {} events, {} possessions, {} shots, {} lineup snapshots",
        meta.id,
        events.len(),
        possessions.len(),
        shots.len(),
        timeline.snapshot_count()
    );

    Ok(GameOutputs {
        meta: meta.clone(),
        events,
        timeline,
        starting_lineups,
        box_scores,
        shots,
        stints,
        possession_events,
        possessions,
        four_factors,
        diagnostics,
    })
}
