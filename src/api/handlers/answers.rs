use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{api::error::ApiError, app::AppState};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub question_id: i32,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
}

/// Answers a question; 404 when the question does not exist.
pub async fn create_answer(
    State(app): State<AppState>,
    Json(request): Json<CreateAnswerRequest>,
) -> Result<Response, ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::public(
            StatusCode::BAD_REQUEST,
            "Content is required",
        ));
    }

    let answer = app
        .service
        .create_answer(
            request.question_id,
            request.content,
            request.user_id,
            request.user_name,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(answer)).into_response())
}
