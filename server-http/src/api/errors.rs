use crate::api::responses::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failures a handler can report, each with its status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Nothing to report, e.g. an empty games list
    NotFound(String),
    /// Games were listed but every detail lookup failed
    Unavailable { total_games: usize },
    /// The request-level upstream call failed
    Upstream {
        message: String,
        source: shared::Error,
    },
}

impl ApiError {
    pub fn upstream(message: impl Into<String>, source: shared::Error) -> Self {
        Self::Upstream {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(message) => ErrorResponse::new(message),
            ApiError::Unavailable { total_games } => ErrorResponse {
                total_games: Some(total_games),
                ..ErrorResponse::new("Could not fetch details for any game from Steam API")
            },
            ApiError::Upstream { message, source } => {
                ErrorResponse::new(message).with_details(source.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}
