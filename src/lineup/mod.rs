pub mod reconstruct;
pub mod starters;
pub mod stints;
pub mod timeline;
pub mod types;

pub use reconstruct::reconstruct_lineups;
pub use starters::{extract_starting_lineups, StartingLineup};
pub use stints::{build_lineup_stints, LineupStint};
pub use timeline::{LineupTimeline, TeamTimeline};
pub use types::{lineup_key, BootstrapLineup, LineupSnapshot, LineupStatus};
