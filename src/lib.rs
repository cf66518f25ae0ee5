use axum::{Extension, Router};
use http::HeaderValue;
use sqlx::SqlitePool;
use std::{path::PathBuf, sync::Arc};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod chat;
pub mod config;
pub mod db;
pub mod errors;
pub mod frontend;
pub mod routes;
pub mod storage;

use chat::ChatCompletion;
use storage::Storage;

/// Everything the router needs, assembled once at startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub db: SqlitePool,
    pub chat: Arc<dyn ChatCompletion>,
    pub frontend_dir: PathBuf,
    pub cors_origin: HeaderValue,
}

/// `/api/*` is matched by the nested API router, which answers unknown API
/// paths itself; everything else falls through to the single-page app.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_router(state.cors_origin))
        .fallback_service(frontend::spa_service(&state.frontend_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(state.storage))
                .layer(Extension(state.db))
                .layer(Extension(state.chat)),
        )
}
