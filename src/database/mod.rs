pub mod box_scores;
pub mod connection;
pub mod four_factors;
pub mod game_diagnostics;
pub mod games;
pub mod lineup_stints;
pub mod lineup_timeline;
pub mod models;
pub mod possessions;
pub mod setup;
pub mod shots;
pub mod starting_lineups;
pub mod writer;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use writer::replace_game;
