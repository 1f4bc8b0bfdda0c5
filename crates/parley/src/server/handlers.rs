//! Request handlers for the suggestion and transcription endpoints
//!
//! Failures surface to callers as a single opaque error body; internal
//! detail (which keys failed, why parsing rejected a reply) stays in
//! the logs.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::suggest::OptionBatch;

const FALLBACK_FILENAME: &str = "audio";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Body of a suggestion request
#[derive(Debug, Deserialize)]
pub struct ChatSuggestionRequest {
    /// Incoming text directed to the person using the device
    pub message: String,
}

/// Body of a successful suggestion response
#[derive(Debug, Serialize)]
pub struct ChatSuggestionResponse {
    /// Four candidate replies to choose from
    pub options: OptionBatch,
    /// Recent suggestion batches, oldest first, the new batch last
    pub recent_history: Vec<OptionBatch>,
}

pub async fn chat_options_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatSuggestionRequest>,
) -> Response {
    if request.message.trim().is_empty() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_request",
            "message must not be empty",
        );
    }

    match state.suggest.suggest(&request.message).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ChatSuggestionResponse {
                options: outcome.options,
                recent_history: outcome.recent_history,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Unable to generate chat suggestions: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "suggestion_failed",
                "Failed to generate chat suggestions",
            )
        }
    }
}

pub async fn transcribe_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, String, Bytes)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let filename = field.file_name().unwrap_or(FALLBACK_FILENAME).to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
                    .to_string();
                match field.bytes().await {
                    Ok(data) => {
                        upload = Some((filename, content_type, data));
                        break;
                    }
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            "invalid_upload",
                            &format!("Failed to read audio upload: {e}"),
                        );
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_upload",
                    &format!("Malformed multipart body: {e}"),
                );
            }
        }
    }

    let Some((filename, content_type, data)) = upload else {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_request",
            "missing 'file' field",
        );
    };

    match state
        .transcribe
        .transcribe(data, &filename, &content_type)
        .await
    {
        Ok(text) => (StatusCode::OK, Json(serde_json::json!({"text": text}))).into_response(),
        Err(e) => {
            tracing::error!("Transcription error: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "transcription_failed",
                &e.to_string(),
            )
        }
    }
}

fn error_response(status: StatusCode, error_type: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "error": {
            "type": error_type,
            "message": message,
        }
    });

    (status, Json(body)).into_response()
}
