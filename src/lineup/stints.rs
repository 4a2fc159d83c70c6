use std::collections::BTreeSet;

use crate::domain::GameMeta;
use crate::pbp::Event;

use super::timeline::LineupTimeline;
use super::types::lineup_key;

/// A stretch of game time during which neither side's five changed, with the
/// score at both ends. Stints close at period boundaries so start and end
/// clocks always live in the same period.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupStint {
    pub game_id: i64,
    pub period: u32,
    pub home_lineup: String,
    pub away_lineup: String,
    pub start_seconds: i64,
    pub end_seconds: i64,
    pub start_home_score: u32,
    pub start_away_score: u32,
    pub end_home_score: u32,
    pub end_away_score: u32,
}

impl LineupStint {
    pub fn duration_seconds(&self) -> i64 {
        self.start_seconds - self.end_seconds
    }

    pub fn home_points(&self) -> i64 {
        i64::from(self.end_home_score) - i64::from(self.start_home_score)
    }

    pub fn away_points(&self) -> i64 {
        i64::from(self.end_away_score) - i64::from(self.start_away_score)
    }

    pub fn home_plus_minus(&self) -> i64 {
        self.home_points() - self.away_points()
    }
}

struct OpenStint {
    period: u32,
    home_key: String,
    away_key: String,
    start_seconds: i64,
    start_score: (u32, u32),
}

/// Segment a game into lineup stints by walking events in order and cutting
/// whenever either side's on-floor five changes.
pub fn build_lineup_stints(
    meta: &GameMeta,
    events: &[Event],
    timeline: &LineupTimeline,
) -> Vec<LineupStint> {
    let empty = BTreeSet::new();
    let mut stints = Vec::new();
    let mut open: Option<OpenStint> = None;
    let mut score = (0u32, 0u32);

    for (ordinal, event) in events.iter().enumerate() {
        let home_key = lineup_key(
            timeline
                .lineup_as_of(meta.home_team_id, ordinal)
                .unwrap_or(&empty),
        );
        let away_key = lineup_key(
            timeline
                .lineup_as_of(meta.away_team_id, ordinal)
                .unwrap_or(&empty),
        );

        let close_at = match &open {
            // Period ended; close out at the buzzer with the score as it
            // stood.
            Some(current) if event.period != current.period => Some((0, score)),
            Some(current) if home_key != current.home_key || away_key != current.away_key => {
                Some((event.seconds_remaining, score_after(score, event)))
            }
            _ => None,
        };
        if let Some((end_seconds, end_score)) = close_at {
            if let Some(closed) = open.take() {
                stints.push(finish(meta.id, closed, end_seconds, end_score));
            }
        }

        score = score_after(score, event);

        if open.is_none() {
            open = Some(OpenStint {
                period: event.period,
                home_key,
                away_key,
                start_seconds: event.seconds_remaining,
                start_score: score,
            });
        }
    }

    if let Some(current) = open {
        let end_seconds = events.last().map(|e| e.seconds_remaining).unwrap_or(0);
        stints.push(finish(meta.id, current, end_seconds, score));
    }

    stints
}

fn finish(game_id: i64, open: OpenStint, end_seconds: i64, end_score: (u32, u32)) -> LineupStint {
    LineupStint {
        game_id,
        period: open.period,
        home_lineup: open.home_key,
        away_lineup: open.away_key,
        start_seconds: open.start_seconds,
        end_seconds,
        start_home_score: open.start_score.0,
        start_away_score: open.start_score.1,
        end_home_score: end_score.0,
        end_away_score: end_score.1,
    }
}

fn score_after(score: (u32, u32), event: &Event) -> (u32, u32) {
    (
        event.home_score.unwrap_or(score.0),
        event.away_score.unwrap_or(score.1),
    )
}
