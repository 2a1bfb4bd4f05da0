use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::ErrorResponse, service::ServiceError};

pub const BAD_REQUEST: &str = "bad request";
pub const INVALID_NOTE_ID: &str = "invalid note ID";
pub const ROUTE_NOT_FOUND: &str = "The route you requested for was not found on this server";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request() -> Self {
        Self::BadRequest(BAD_REQUEST.to_string())
    }

    pub fn invalid_note_id() -> Self {
        Self::BadRequest(INVALID_NOTE_ID.to_string())
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::NotFound => Self::NotFound(message),
            ServiceError::TitleTaken => Self::Conflict(message),
            ServiceError::Internal => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
