use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{admin::admin_refresh, games::{get_games, get_boxscore, get_shots, get_lineups, get_possessions, get_four_factors}, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/games", get(get_games))
        .route("/api/games/:id/boxscore", get(get_boxscore))
        .route("/api/games/:id/shots", get(get_shots))
        .route("/api/games/:id/lineups", get(get_lineups))
        .route("/api/games/:id/possessions", get(get_possessions))
        .route("/api/games/:id/fourfactors", get(get_four_factors))
        .route("/api/admin/refresh", post(admin_refresh))
        .with_state(state)
}
