use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use tokio::net::TcpListener;

use crate::{
    api,
    cache::QuestionCache,
    config::Settings,
    services::QnaService,
    store::PgStore,
};

/// Shared handler state. The cache lives inside the service and is
/// constructed once here at startup, never as a hidden global.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QnaService>,
}

impl AppState {
    pub fn new(service: Arc<QnaService>) -> Self {
        Self { service }
    }
}

pub async fn connect_to_db(database_url: &str) -> Result<Pool<Postgres>> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    // Run SQL migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("SQL migrations failed")?;

    Ok(pool)
}

pub fn build_app_state(pool: Pool<Postgres>, config: &Settings) -> AppState {
    let store = Arc::new(PgStore::new(pool));
    let cache = QuestionCache::new(config.cache_ttl, config.cache_capacity);

    AppState::new(Arc::new(QnaService::new(store, cache)))
}

pub async fn run(config: Settings) -> Result<()> {
    let pool = connect_to_db(config.database_url.as_str()).await?;
    let state = build_app_state(pool, &config);

    let frontend_origin = config
        .frontend_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("Frontend origin is not a valid header value")?;
    let router = api::build_router(state, frontend_origin);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("App running on {addr}");

    axum::serve(listener, router).await?;

    Ok(())
}
