use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{run_blocking, AppState};
use crate::api::error::ApiResult;
use crate::api::models::{CountResponse, RemovedResponse};
use crate::domain::{CountScope, PlayerId, PlayerSelection, RemovalScope};

pub async fn count_active_players(State(state): State<Arc<AppState>>) -> ApiResult<Json<CountResponse>> {
    let count = run_blocking(&state, |service| service.count_players(CountScope::ActivePlayers)).await?;
    Ok(Json(CountResponse { count }))
}

pub async fn deactivate_all_players(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RemovedResponse>> {
    let removed = run_blocking(&state, |service| {
        service.delete_players(PlayerSelection::All, RemovalScope::Everywhere)
    })
    .await?;
    Ok(Json(RemovedResponse { removed }))
}

pub async fn deactivate_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
) -> ApiResult<Json<RemovedResponse>> {
    let removed = run_blocking(&state, move |service| {
        service.delete_players(PlayerSelection::Single(player_id), RemovalScope::Everywhere)
    })
    .await?;
    Ok(Json(RemovedResponse { removed }))
}
