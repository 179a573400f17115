use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{api::error::ApiError, app::AppState, domain::Title};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    pub include_answers: bool,
    pub search: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            include_answers: false,
            search: None,
            page: 1,
            page_size: 20,
        }
    }
}

pub async fn list_questions(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    // Same branching as the search-less/search split: a search term
    // wins over includeAnswers.
    match params.search.filter(|s| !s.is_empty()) {
        Some(search) => {
            let questions = app
                .service
                .search_questions(&search, params.page, params.page_size)
                .await?;

            Ok(Json(questions).into_response())
        }
        None if params.include_answers => {
            let questions = app.service.list_questions_with_answers().await?;

            Ok(Json(questions).into_response())
        }
        None => {
            let questions = app.service.list_questions().await?;

            Ok(Json(questions).into_response())
        }
    }
}

pub async fn list_unanswered_questions(
    State(app): State<AppState>,
) -> Result<Response, ApiError> {
    let questions = app.service.list_unanswered_questions().await?;

    Ok(Json(questions).into_response())
}

pub async fn get_question(
    State(app): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Response, ApiError> {
    let question = app.service.get_question(question_id).await?;

    Ok(Json(&*question).into_response())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
}

pub async fn create_question(
    State(app): State<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<Response, ApiError> {
    let title = Title::parse(&request.title)?;
    if request.content.trim().is_empty() {
        return Err(ApiError::public(
            StatusCode::BAD_REQUEST,
            "Content is required",
        ));
    }

    let question = app
        .service
        .create_question(title, request.content, request.user_id, request.user_name)
        .await?;

    Ok((StatusCode::CREATED, Json(question)).into_response())
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub async fn update_question(
    State(app): State<AppState>,
    Path(question_id): Path<i32>,
    Json(request): Json<UpdateQuestionRequest>,
) -> Result<Response, ApiError> {
    // Empty strings count as "keep the current value".
    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .map(|t| Title::parse(&t))
        .transpose()?;
    let content = request.content.filter(|c| !c.trim().is_empty());

    let question = app
        .service
        .update_question(question_id, title, content)
        .await?;

    Ok(Json(question).into_response())
}

pub async fn delete_question(
    State(app): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Response, ApiError> {
    app.service.delete_question(question_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
