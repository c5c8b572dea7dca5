// src/api/handlers.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::{types::*, ApiState};
use crate::infra::errors::ChatError;

/// POST /chat — Run one conversation turn.
pub async fn chat(
    State(state): State<ApiState>,
    Json(body): Json<ChatTurnRequest>,
) -> Result<Json<ChatTurnResponse>, (StatusCode, Json<ErrorResponse>)> {
    if body.user_id.trim().is_empty() {
        return Err(bad_request("user_id cannot be empty"));
    }
    if body.content.trim().is_empty() {
        return Err(bad_request("content cannot be empty"));
    }

    let outcome = state
        .engine
        .handle_turn(&body.user_id, body.session_id.as_deref(), &body.content)
        .await
        .map_err(into_error_response)?;

    Ok(Json(ChatTurnResponse {
        session_id: outcome.session_id,
        messages: AssistantMessage::assistant(outcome.reply),
        project_data: outcome.project_data,
    }))
}

/// GET / — Liveness probe (response body preserved from the original service).
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "service start...",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map engine errors onto HTTP statuses. Provider trouble is the upstream's
/// fault (502); everything else unexpected is a 500.
fn into_error_response(err: ChatError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        ChatError::Validation(_) => StatusCode::BAD_REQUEST,
        ChatError::Provider { .. } | ChatError::RateLimited { .. } | ChatError::NoProvider => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("chat turn failed: {err}");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
