use anyhow::Result;

use super::free_throws::FreeThrowFlags;
use super::types::{PossessionEvent, PossessionOutcome};
use crate::pbp::{made_from_text, missed_from_text, Event};

/// Whether a Dead Ball Rebound row should end the possession. Only the
/// default class ends it; the other three mark rebounds that happen inside
/// a sequence that is still open or already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeadBallClass {
    EndPossession,
    MidFtSequence,
    AfterMadeLastFt,
    SameTeamFgMiss,
}

/// Walks the canonical event stream and assigns a possession id and
/// possession team to every event.
///
/// Possession changes on made field goals, made trip-ending free throws,
/// turnovers, defensive rebounds, possession-ending dead ball rebounds and
/// period ends. A free throw following a made basket by the same team is an
/// and-one: the free throw belongs to the basket's possession, so the rows
/// recorded since the basket are folded back into it.
pub fn track_possessions(events: &[Event]) -> Result<Vec<PossessionEvent>> {
    let flags = FreeThrowFlags::compute(events)?;
    let dead_ball_classes = classify_dead_ball_rebounds(events, &flags);
    let teams = observed_teams(events);

    let mut possession_id: i64 = 0;
    let mut possession_team: Option<i64> = None;
    let mut last_end_reason: Option<PossessionOutcome> = None;
    let mut last_end_team: Option<i64> = None;
    let mut records: Vec<PossessionEvent> = Vec::with_capacity(events.len());

    for (ordinal, event) in events.iter().enumerate() {
        let play_type = event.play_type.as_deref().unwrap_or("");
        let team = event.team_id;
        let mut outcome: Option<PossessionOutcome> = None;
        let mut end_possession = false;
        let mut next_team: Option<i64> = None;

        if play_type == "Jumpball" {
            if event.text_contains("won") && team.is_some() && possession_team.is_none() {
                possession_team = team;
            }
        } else if event.is_field_goal_attempt() {
            if possession_team.is_none() {
                possession_team = team;
            }
            if event.made_shot() {
                outcome = Some(PossessionOutcome::MadeFg);
                end_possession = true;
                next_team = other_team(&teams, possession_team);
            }
        } else if play_type == "MadeFreeThrow" {
            if flags.is_technical(ordinal) {
                // Shooting team retains the ball after a technical.
                outcome = Some(PossessionOutcome::TechFt);
            } else {
                let and_one = team.is_some()
                    && possession_team.is_some()
                    && team != possession_team
                    && last_end_reason == Some(PossessionOutcome::MadeFg)
                    && last_end_team == team;
                if and_one {
                    possession_id -= 1;
                    possession_team = team;
                    for record in records.iter_mut().rev() {
                        if record.possession_id == possession_id + 1 {
                            record.possession_id = possession_id;
                            record.team_id = possession_team;
                        } else {
                            break;
                        }
                    }
                    last_end_reason = Some(PossessionOutcome::And1Ft);
                } else if possession_team.is_none() && team.is_some() {
                    possession_team = team;
                }
                if flags.is_last(ordinal) {
                    if event.made_shot() {
                        outcome = Some(PossessionOutcome::MadeFt);
                        end_possession = true;
                        next_team = other_team(&teams, possession_team);
                    } else {
                        // Missed last free throw: live rebound decides.
                        outcome = Some(PossessionOutcome::MissedLastFt);
                    }
                }
            }
        } else if play_type.contains("Turnover") {
            if possession_team.is_none() && team.is_some() {
                possession_team = team;
            }
            outcome = Some(PossessionOutcome::Turnover);
            end_possession = true;
            next_team = other_team(&teams, possession_team);
        } else if play_type == "Steal" {
            outcome = Some(PossessionOutcome::Steal);
        } else if play_type == "Defensive Rebound" {
            outcome = Some(PossessionOutcome::DefRebound);
            end_possession = true;
            next_team = team;
        } else if play_type == "Offensive Rebound" {
            outcome = Some(PossessionOutcome::OffRebound);
        } else if play_type == "Dead Ball Rebound" {
            outcome = Some(PossessionOutcome::DeadBallRebound);
            if dead_ball_classes[ordinal] == DeadBallClass::EndPossession {
                end_possession = true;
                next_team = team;
            }
        } else if matches!(play_type, "End Period" | "End Game") {
            outcome = Some(PossessionOutcome::EndPeriod);
            end_possession = true;
            next_team = None;
        }

        records.push(PossessionEvent {
            event_ordinal: ordinal,
            event_id: event.event_id,
            possession_id,
            team_id: possession_team,
            outcome,
        });

        if end_possession {
            last_end_reason = outcome;
            last_end_team = possession_team;
            possession_id += 1;
            possession_team = next_team;
        } else if !matches!(
            play_type,
            "PersonalFoul" | "MadeFreeThrow" | "Substitution" | "Official TV Timeout" | ""
        ) {
            // Administrative rows keep the and-one window open; any other
            // live play closes it.
            last_end_reason = None;
            last_end_team = None;
        }
    }

    Ok(records)
}

/// Team ids in order of first appearance.
fn observed_teams(events: &[Event]) -> Vec<i64> {
    let mut teams = Vec::new();
    for event in events {
        if let Some(team) = event.team_id {
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
    }
    teams
}

fn other_team(teams: &[i64], current: Option<i64>) -> Option<i64> {
    match current {
        Some(team) => teams.iter().copied().find(|&t| t != team),
        None => teams.first().copied(),
    }
}

fn classify_dead_ball_rebounds(events: &[Event], flags: &FreeThrowFlags) -> Vec<DeadBallClass> {
    let mut classes = vec![DeadBallClass::EndPossession; events.len()];
    for (ordinal, event) in events.iter().enumerate() {
        if !event.type_is("Dead Ball Rebound") {
            continue;
        }
        let earliest = ordinal.saturating_sub(9);
        for back in (earliest..ordinal).rev() {
            let prev = &events[back];
            if prev.period != event.period {
                break;
            }
            let prev_type = prev.play_type.as_deref().unwrap_or("");
            if matches!(prev_type, "Substitution" | "Official TV Timeout" | "") {
                continue;
            }
            if prev_type == "MadeFreeThrow" {
                if !flags.is_last(back) {
                    classes[ordinal] = DeadBallClass::MidFtSequence;
                } else if made_from_text(&prev.play_text) {
                    classes[ordinal] = DeadBallClass::AfterMadeLastFt;
                }
                break;
            }
            if prev.is_field_goal_attempt() {
                if missed_from_text(&prev.play_text)
                    && prev.team_id.is_some()
                    && prev.team_id == event.team_id
                {
                    classes[ordinal] = DeadBallClass::SameTeamFgMiss;
                }
                break;
            }
            if prev_type.contains("Turnover") || prev_type == "PersonalFoul" {
                break;
            }
        }
    }
    classes
}
