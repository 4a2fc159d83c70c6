use anyhow::{Context, Result};
use regex::Regex;

use crate::pbp::Event;

/// Per-event free throw annotations, computed in one pass before possession
/// tracking. Indexed by event ordinal.
///
/// Last-of-trip detection supports both feed vintages: newer text carries an
/// "M of N" counter (last when M == N), older text does not, so we fall back
/// to checking whether the next row is another free throw at the same clock.
/// Technical free throws are found by walking back through the rows at the
/// same clock looking for a technical foul.
pub struct FreeThrowFlags {
    last_ft: Vec<bool>,
    technical_ft: Vec<bool>,
}

impl FreeThrowFlags {
    pub fn compute(events: &[Event]) -> Result<Self> {
        let m_of_n = compile_ft_count_regex()?;
        Ok(FreeThrowFlags {
            last_ft: compute_last_ft(events, &m_of_n),
            technical_ft: compute_technical_ft(events),
        })
    }

    /// True when the event is a free throw ending its trip.
    pub fn is_last(&self, ordinal: usize) -> bool {
        self.last_ft.get(ordinal).copied().unwrap_or(false)
    }

    /// True when the event is a technical foul free throw.
    pub fn is_technical(&self, ordinal: usize) -> bool {
        self.technical_ft.get(ordinal).copied().unwrap_or(false)
    }
}

fn compile_ft_count_regex() -> Result<Regex> {
    Regex::new(r"(\d+)\s+of\s+(\d+)").context("Failed to compile free throw count regex")
}

fn compute_last_ft(events: &[Event], m_of_n: &Regex) -> Vec<bool> {
    let mut flags = vec![false; events.len()];
    for (ordinal, event) in events.iter().enumerate() {
        if !event.type_is("MadeFreeThrow") {
            continue;
        }
        let text = event.play_text.to_lowercase();
        if let Some(caps) = m_of_n.captures(&text) {
            let made: u64 = caps[1].parse().unwrap_or(0);
            let total: u64 = caps[2].parse().unwrap_or(0);
            flags[ordinal] = made == total;
            continue;
        }
        flags[ordinal] = match events.get(ordinal + 1) {
            Some(next) => {
                let same_clock = next.period == event.period
                    && next.seconds_remaining == event.seconds_remaining;
                !(same_clock && next.type_is("MadeFreeThrow"))
            }
            None => true,
        };
    }
    flags
}

fn compute_technical_ft(events: &[Event]) -> Vec<bool> {
    let mut flags = vec![false; events.len()];
    for (ordinal, event) in events.iter().enumerate() {
        if !event.type_is("MadeFreeThrow") {
            continue;
        }
        let earliest = ordinal.saturating_sub(5);
        for back in (earliest..ordinal).rev() {
            let prev = &events[back];
            if prev.period != event.period || prev.seconds_remaining != event.seconds_remaining {
                break;
            }
            if prev.type_contains("Technical") {
                flags[ordinal] = true;
                break;
            }
            // Other shooters of the same trip and the foul rows themselves
            // sit between the technical and this free throw.
            if prev.type_is("MadeFreeThrow") || prev.type_is("PersonalFoul") {
                continue;
            }
            break;
        }
    }
    flags
}
