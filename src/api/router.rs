use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{api::handlers, app::AppState};

pub fn build_router(state: AppState, frontend_origin: Option<HeaderValue>) -> Router {
    let cors = match frontend_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new(),
    };

    let questions_api = Router::new()
        .route(
            "/",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route("/unanswered", get(handlers::list_unanswered_questions))
        .route("/answer", post(handlers::create_answer))
        .route(
            "/{question_id}",
            get(handlers::get_question)
                .put(handlers::update_question)
                .delete(handlers::delete_question),
        );

    Router::new()
        .nest("/api/questions", questions_api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
