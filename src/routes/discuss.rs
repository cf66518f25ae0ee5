use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chat::{ChatCompletion, error_marker};

#[derive(Debug, Default, Deserialize)]
pub struct DiscussRequest {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
pub struct DiscussResponse {
    assistant: String,
}

/// Forwards one message to the chat model. Upstream failures become the
/// reply text; this handler itself never fails.
pub async fn discuss(
    Path(pid): Path<String>,
    Extension(chat): Extension<Arc<dyn ChatCompletion>>,
    body: Result<Json<DiscussRequest>, JsonRejection>,
) -> Json<DiscussResponse> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let assistant = match chat.complete(&request.message).await {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(project_id = %pid, error = %e, "chat completion failed");
            error_marker(&e)
        }
    };

    Json(DiscussResponse { assistant })
}
