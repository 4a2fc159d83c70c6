use crate::domain::{GameMeta, PlayResponse};
use crate::errors::{GameDiagnostics, NormalizationError};

use super::classify::PlayClassifier;
use super::event::{made_from_text, Event, EventKind, ShotDetail, ShotRange};

/// Normalize a raw feed into ordered, typed events.
///
/// Fails the whole game when a record is missing its period or clock;
/// everything else degrades into tallies on `diagnostics`. Output order is
/// total (period, clock descending, sequence hint, feed position), so the
/// same feed always normalizes to the same event sequence.
pub fn normalize_game(
    meta: &GameMeta,
    plays: &[PlayResponse],
    classifier: &dyn PlayClassifier,
    diagnostics: &mut GameDiagnostics,
) -> Result<Vec<Event>, NormalizationError> {
    if plays.is_empty() {
        return Err(NormalizationError::EmptyFeed);
    }
    let mut events = Vec::with_capacity(plays.len());
    for (index, play) in plays.iter().enumerate() {
        events.push(normalize_play(meta, play, index, classifier, diagnostics)?);
    }
    events.sort_by_key(|e| e.sort_key());
    Ok(events)
}

fn normalize_play(
    meta: &GameMeta,
    play: &PlayResponse,
    index: usize,
    classifier: &dyn PlayClassifier,
    diagnostics: &mut GameDiagnostics,
) -> Result<Event, NormalizationError> {
    let period = play.period.ok_or(NormalizationError::MissingField {
        index,
        field: "period",
    })?;
    let seconds_remaining = resolve_clock(play, index)?;

    let classification = classifier.classify(play);
    if classification.is_unclassified() {
        diagnostics.unclassified_events += 1;
    }
    let kind = classification.kind();
    if kind == EventKind::Other && !classification.is_unclassified() {
        diagnostics.other_events += 1;
    }

    let shot = if kind == EventKind::Shot {
        Some(build_shot_detail(play))
    } else {
        None
    };

    Ok(Event {
        event_id: play.id,
        game_id: play.game_id,
        period,
        seconds_remaining,
        sequence_hint: play.sequence_number.unwrap_or(play.id),
        feed_index: index,
        kind,
        team_id: resolve_team(meta, play),
        participant_ids: play.participants.iter().filter_map(|p| p.id).collect(),
        shot,
        play_type: play.play_type.clone(),
        play_text: play.play_text.clone().unwrap_or_default(),
        home_score: play.home_score,
        away_score: play.away_score,
        unclassified: classification.is_unclassified(),
    })
}

/// Numeric seconds-remaining wins; a "MM:SS" clock string is the fallback.
fn resolve_clock(play: &PlayResponse, index: usize) -> Result<i64, NormalizationError> {
    if let Some(seconds) = play.seconds_remaining {
        return Ok(seconds.round() as i64);
    }
    let raw = play
        .clock
        .as_deref()
        .ok_or(NormalizationError::MissingField {
            index,
            field: "secondsRemaining",
        })?;
    parse_clock(raw).ok_or_else(|| NormalizationError::InvalidClock {
        index,
        raw: raw.to_string(),
    })
}

fn parse_clock(raw: &str) -> Option<i64> {
    let (minutes, seconds) = raw.trim().split_once(':')?;
    let minutes: i64 = minutes.trim().parse().ok()?;
    let seconds: f64 = seconds.trim().parse().ok()?;
    if minutes < 0 || !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(minutes * 60 + seconds as i64)
}

/// Plays attribute teams by id when the feed carries one, otherwise by name
/// against the game record.
fn resolve_team(meta: &GameMeta, play: &PlayResponse) -> Option<i64> {
    play.team_id
        .or_else(|| play.team.as_deref().and_then(|name| meta.team_id_for_name(name)))
}

fn build_shot_detail(play: &PlayResponse) -> ShotDetail {
    let info = play.shot_info.as_ref();
    let text = play.play_text.as_deref().unwrap_or("");
    let made = info
        .and_then(|i| i.made)
        .unwrap_or_else(|| play.scoring_play || made_from_text(text));
    let shooter_id = info
        .and_then(|i| i.shooter.as_ref())
        .and_then(|s| s.id)
        .or_else(|| play.participants.first().and_then(|p| p.id));
    let assisted_by_id = info.and_then(|i| i.assisted_by.as_ref()).and_then(|a| a.id);
    let assisted = info
        .and_then(|i| i.assisted)
        .unwrap_or(assisted_by_id.is_some());
    let location = info
        .and_then(|i| i.location.as_ref())
        .and_then(|loc| match (loc.x, loc.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        });
    ShotDetail {
        shooter_id,
        made,
        range: resolve_shot_range(
            info.and_then(|i| i.range.as_deref()),
            play.play_type.as_deref(),
            text,
        ),
        assisted,
        assisted_by_id,
        location,
    }
}

/// Resolution chain: wire range string, then play type, then a text probe.
/// Always lands on a concrete range so point values stay total.
fn resolve_shot_range(range: Option<&str>, play_type: Option<&str>, text: &str) -> ShotRange {
    if let Some(range) = range {
        let lower = range.to_lowercase();
        if lower.contains("three") {
            return ShotRange::ThreePointer;
        }
        if lower.contains("free") {
            return ShotRange::FreeThrow;
        }
        if ["rim", "layup", "dunk", "tip"].iter().any(|k| lower.contains(k)) {
            return ShotRange::Rim;
        }
        if lower.contains("jump") {
            return ShotRange::Jumper;
        }
    }
    if let Some(play_type) = play_type {
        if play_type.contains("FreeThrow") {
            return ShotRange::FreeThrow;
        }
        if matches!(play_type, "LayUpShot" | "DunkShot" | "TipShot") {
            return ShotRange::Rim;
        }
    }
    let lower_text = text.to_lowercase();
    if lower_text.contains("free throw") {
        return ShotRange::FreeThrow;
    }
    if lower_text.contains("three point") {
        return ShotRange::ThreePointer;
    }
    ShotRange::Jumper
}
