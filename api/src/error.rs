use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authorized")]
    Unauthorized,

    #[error("OpenAI API key is not configured.")]
    Misconfigured,

    /// Body could not be read as `{ "message": "..." }`.
    #[error("{detail}")]
    InvalidBody { status: StatusCode, detail: String },

    /// Anything the completion call failed with, text preserved.
    #[error("{0}")]
    RemoteFailure(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Misconfigured | Self::RemoteFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
