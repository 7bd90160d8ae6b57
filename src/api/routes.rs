use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{players, tournaments, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route("/api/tournaments/current", get(tournaments::current_tournament))
        .route("/api/tournaments/:id", get(tournaments::get_tournament))
        .route(
            "/api/tournaments/:id/players",
            post(tournaments::register_player).delete(tournaments::remove_all_players),
        )
        .route(
            "/api/tournaments/:id/players/:player_id",
            post(tournaments::enroll_player).delete(tournaments::remove_player),
        )
        .route("/api/tournaments/:id/standings", get(tournaments::get_standings))
        .route("/api/tournaments/:id/pairings", post(tournaments::create_pairings))
        .route(
            "/api/tournaments/:id/matches",
            get(tournaments::list_matches)
                .post(tournaments::report_match)
                .delete(tournaments::reset_matches),
        )
        .route("/api/players", delete(players::deactivate_all_players))
        .route("/api/players/count", get(players::count_active_players))
        .route("/api/players/:player_id", delete(players::deactivate_player))
        .with_state(state)
}
