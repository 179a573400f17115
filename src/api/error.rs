use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{domain::TitleParseError, services::ServiceError};

pub struct ApiError {
    status_code: StatusCode,
    reason: &'static str,
}

#[derive(Deserialize, Serialize)]
struct ApiErrorBody(&'static str);

impl ApiError {
    pub fn public(status_code: StatusCode, reason: &'static str) -> Self {
        Self {
            status_code,
            reason,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            reason: "Not found",
        }
    }

    pub fn internal() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            reason: "Internal server error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound => Self::not_found(),
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "store error");
                Self::internal()
            }
            ServiceError::Flatten(e) => {
                tracing::error!(error = %e, "flattening error");
                Self::internal()
            }
        }
    }
}

impl From<TitleParseError> for ApiError {
    fn from(error: TitleParseError) -> Self {
        match error {
            TitleParseError::Empty => Self::public(StatusCode::BAD_REQUEST, "Title is required"),
            TitleParseError::TooLong => Self::public(StatusCode::BAD_REQUEST, "Title is too long"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(ApiErrorBody(self.reason))).into_response()
    }
}
