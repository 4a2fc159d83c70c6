pub mod classify;
pub mod free_throws;
pub mod tracker;
pub mod types;

pub use classify::classify_possessions;
pub use free_throws::FreeThrowFlags;
pub use tracker::track_possessions;
pub use types::{Possession, PossessionEvent, PossessionOutcome, PossessionType};
