pub mod classify;
pub mod event;
pub mod normalize;

pub use classify::{Classification, PlayClassifier, TextPatternClassifier};
pub use event::{
    made_from_text, missed_from_text, Event, EventKind, ShotDetail, ShotRange, FIELD_GOAL_TYPES,
};
pub use normalize::normalize_game;
