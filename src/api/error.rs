use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tokio::task::JoinError;

use crate::errors::TournamentError;

/// Web layer errors
#[derive(Debug)]
pub enum ApiError {
    Tournament(TournamentError),
    Task(JoinError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tournament(e) => write!(f, "{}", e),
            Self::Task(e) => write!(f, "Background task failed: {}", e),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Tournament(e) => match e {
                TournamentError::NotFound(_) | TournamentError::NoTournament => StatusCode::NOT_FOUND,
                TournamentError::AlreadyRegistered { .. }
                | TournamentError::DuplicateReport { .. } => StatusCode::CONFLICT,
                TournamentError::OddPlayerCount(_) | TournamentError::EmptyTournament => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                TournamentError::SelfMatch(_) | TournamentError::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                TournamentError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
                TournamentError::Storage(_) | TournamentError::Integrity(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = if status_code.is_server_error() {
            log::error!("Request failed: {:?}", self);
            json!({ "error": "An internal error occurred" })
        } else {
            json!({ "error": self.to_string() })
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<TournamentError> for ApiError {
    fn from(error: TournamentError) -> Self {
        Self::Tournament(error)
    }
}

impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        Self::Task(error)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
