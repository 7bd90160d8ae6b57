use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{run_blocking, AppState};
use crate::api::error::ApiResult;
use crate::api::models::{
    CreateTournamentRequest, RegisterPlayerRequest, RemovedResponse, ReportMatchRequest,
};
use crate::database::{MatchRecord, Participation, Player, Tournament};
use crate::domain::{Pairing, PlayerId, PlayerSelection, RemovalScope, Standing, TournamentId};
use crate::services::TournamentSummary;

pub async fn list_tournaments(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Tournament>>> {
    let tournaments = run_blocking(&state, |service| service.list_tournaments()).await?;
    Ok(Json(tournaments))
}

pub async fn create_tournament(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTournamentRequest>,
) -> ApiResult<(StatusCode, Json<Tournament>)> {
    let tournament = run_blocking(&state, move |service| service.create_tournament(&request.name)).await?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

pub async fn current_tournament(State(state): State<Arc<AppState>>) -> ApiResult<Json<Tournament>> {
    let tournament = run_blocking(&state, |service| service.current_tournament()).await?;
    Ok(Json(tournament))
}

pub async fn get_tournament(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
) -> ApiResult<Json<TournamentSummary>> {
    let summary = run_blocking(&state, move |service| service.tournament_summary(tournament_id)).await?;
    Ok(Json(summary))
}

pub async fn register_player(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
    Json(request): Json<RegisterPlayerRequest>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    let player = run_blocking(&state, move |service| {
        service.register_player(tournament_id, &request.name, &request.email)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn remove_all_players(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
) -> ApiResult<Json<RemovedResponse>> {
    let removed = run_blocking(&state, move |service| {
        service.delete_players(PlayerSelection::All, RemovalScope::Tournament(tournament_id))
    })
    .await?;
    Ok(Json(RemovedResponse { removed }))
}

pub async fn enroll_player(
    State(state): State<Arc<AppState>>,
    Path((tournament_id, player_id)): Path<(TournamentId, PlayerId)>,
) -> ApiResult<(StatusCode, Json<Participation>)> {
    let participation =
        run_blocking(&state, move |service| service.enroll_player(tournament_id, player_id)).await?;
    Ok((StatusCode::CREATED, Json(participation)))
}

pub async fn remove_player(
    State(state): State<Arc<AppState>>,
    Path((tournament_id, player_id)): Path<(TournamentId, PlayerId)>,
) -> ApiResult<Json<RemovedResponse>> {
    let removed = run_blocking(&state, move |service| {
        service.delete_players(
            PlayerSelection::Single(player_id),
            RemovalScope::Tournament(tournament_id),
        )
    })
    .await?;
    Ok(Json(RemovedResponse { removed }))
}

pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
) -> ApiResult<Json<Vec<Standing>>> {
    let standings = run_blocking(&state, move |service| service.player_standings(tournament_id)).await?;
    Ok(Json(standings))
}

pub async fn create_pairings(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
) -> ApiResult<(StatusCode, Json<Vec<Pairing>>)> {
    let pairings = run_blocking(&state, move |service| service.swiss_pairings(tournament_id)).await?;
    Ok((StatusCode::CREATED, Json(pairings)))
}

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
) -> ApiResult<Json<Vec<MatchRecord>>> {
    let matches = run_blocking(&state, move |service| service.list_matches(tournament_id)).await?;
    Ok(Json(matches))
}

pub async fn report_match(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
    Json(request): Json<ReportMatchRequest>,
) -> ApiResult<(StatusCode, Json<MatchRecord>)> {
    let record = run_blocking(&state, move |service| {
        service.report_match(tournament_id, request.winner_id, request.loser_id)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn reset_matches(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<TournamentId>,
) -> ApiResult<StatusCode> {
    run_blocking(&state, move |service| service.delete_matches(tournament_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
