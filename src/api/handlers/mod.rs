use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::TournamentService;

pub mod players;
pub mod tournaments;

pub struct AppState {
    pub service: TournamentService,
    pub config: AppConfig,
}

/// Runs a service call on the blocking pool; the service holds locks and
/// pooled SQLite connections that must stay off the async workers.
pub async fn run_blocking<T, F>(state: &Arc<AppState>, f: F) -> ApiResult<T>
where
    F: FnOnce(&TournamentService) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    let result = tokio::task::spawn_blocking(move || f(&state.service)).await?;
    Ok(result?)
}
