use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::PlayResponse;

use super::event::EventKind;

/// Outcome of classifying one raw play. `Unclassified` marks records whose
/// type could not be resolved at all; they normalize to [`EventKind::Other`]
/// and are tallied in the game diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    SubstitutionIn,
    SubstitutionOut,
    Shot,
    Other,
    Unclassified,
}

impl Classification {
    pub fn kind(&self) -> EventKind {
        match self {
            Classification::SubstitutionIn => EventKind::SubstitutionIn,
            Classification::SubstitutionOut => EventKind::SubstitutionOut,
            Classification::Shot => EventKind::Shot,
            Classification::Other | Classification::Unclassified => EventKind::Other,
        }
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, Classification::Unclassified)
    }
}

/// Maps raw play records to event kinds. A trait so alternative feed
/// vocabularies can plug in without touching the normalizer.
pub trait PlayClassifier {
    fn classify(&self, play: &PlayResponse) -> Classification;
}

/// Classifier for the stock feed vocabulary: substitutions are phrased
/// "<player> subbing in/out for <other>", shots carry the `shootingPlay`
/// flag.
pub struct TextPatternClassifier {
    substitution: Regex,
}

impl TextPatternClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            substitution: Self::compile_substitution_regex()?,
        })
    }

    fn compile_substitution_regex() -> Result<Regex> {
        Regex::new(r"(?i)^\s*(?P<player>.+?)\s+subbing\s+(?P<direction>in|out)\b")
            .context("Failed to compile substitution regex")
    }

    fn classify_substitution(&self, play: &PlayResponse) -> Classification {
        let text = play.play_text.as_deref().unwrap_or("");
        let Some(caps) = self.substitution.captures(text) else {
            return Classification::Unclassified;
        };
        if !Self::player_matches_participant(&caps["player"], play) {
            return Classification::Unclassified;
        }
        if caps["direction"].eq_ignore_ascii_case("in") {
            Classification::SubstitutionIn
        } else {
            Classification::SubstitutionOut
        }
    }

    /// The phrased player must agree with the participant field when the
    /// feed provides both.
    fn player_matches_participant(phrased: &str, play: &PlayResponse) -> bool {
        let Some(name) = play.participants.first().and_then(|p| p.name.as_deref()) else {
            return true;
        };
        phrased.trim().eq_ignore_ascii_case(name.trim())
    }

    fn looks_like_substitution(&self, play: &PlayResponse) -> bool {
        play.play_text
            .as_deref()
            .map(|t| self.substitution.is_match(t))
            .unwrap_or(false)
    }
}

impl PlayClassifier for TextPatternClassifier {
    fn classify(&self, play: &PlayResponse) -> Classification {
        let play_type = play.play_type.as_deref().unwrap_or("");
        if play_type == "Substitution" {
            return self.classify_substitution(play);
        }
        if play.shooting_play {
            return Classification::Shot;
        }
        // Some feeds drop the type on substitution rows but keep the phrasing.
        if play_type.is_empty() && self.looks_like_substitution(play) {
            return self.classify_substitution(play);
        }
        if play_type.is_empty() && play.play_text.as_deref().unwrap_or("").is_empty() {
            return Classification::Unclassified;
        }
        Classification::Other
    }
}
