use anyhow::{Context, Result};

use crate::pipeline::GameOutputs;

use super::connection::DbConn;
use super::models::GameRow;
use super::{
    box_scores, four_factors, game_diagnostics, games, lineup_stints, lineup_timeline,
    possessions, shots, starting_lineups,
};

/// Replace every stored row for one game inside a single transaction.
/// Reprocessing is idempotent: a second run rewrites exactly the rows the
/// first run produced, and a failure partway leaves the previous rows intact.
pub fn replace_game(conn: &mut DbConn, game: &GameRow, outputs: &GameOutputs) -> Result<()> {
    let tx = conn
        .transaction()
        .context("Failed to open game replace transaction")?;

    games::upsert_game(&tx, game)?;
    lineup_timeline::replace_for_game(&tx, game.id, &outputs.timeline)?;
    starting_lineups::replace_for_game(&tx, game.id, &outputs.starting_lineups)?;
    box_scores::replace_for_game(&tx, game.id, &outputs.box_scores)?;
    shots::replace_for_game(&tx, game.id, &outputs.shots)?;
    lineup_stints::replace_for_game(&tx, game.id, &outputs.stints)?;
    possessions::replace_for_game(&tx, game.id, &outputs.possessions)?;
    four_factors::replace_for_game(&tx, game.id, &outputs.four_factors)?;
    game_diagnostics::replace_for_game(&tx, &outputs.diagnostics)?;

    tx.commit().context("Failed to commit game rows")
}
