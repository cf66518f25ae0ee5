mod discuss;
mod files;
mod projects;
mod records;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use http::{HeaderValue, Method};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::errors::ApiError;

/// Routes mounted under `/api`.
///
/// File retrieval sits outside the CORS layer because it always allows any
/// origin on its own.
pub fn api_router(cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/projects/{pid}/files/{filename}", get(files::serve_file))
        .merge(
            Router::new()
                .route("/health", get(health))
                .route("/projects", get(projects::list).post(projects::create))
                .route("/projects/{pid}/upload", post(files::upload))
                .route("/projects/{pid}/save-pdf", post(files::save_pdf))
                .route("/projects/{pid}/save_annotated_pdf", post(files::save_pdf))
                .route("/projects/{pid}/discuss", post(discuss::discuss))
                .route(
                    "/projects/{pid}/annotations",
                    get(records::list_annotations).post(records::create_annotation),
                )
                .route(
                    "/projects/{pid}/reports",
                    get(records::list_reports).post(records::create_report),
                )
                .route(
                    "/projects/{pid}/discussions",
                    get(records::list_discussions).post(records::create_discussion),
                )
                .layer(cors),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found.".to_string())
}
