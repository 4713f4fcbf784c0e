//! HTTP handlers for the webhook endpoint

use axum::{
    Json,
    body::Bytes,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
};
use serde::Serialize;
use tracing::{error, info};

use crate::SharedState;
use crate::message::{MAX_MESSAGE_LENGTH, build_chunks};
use crate::utils::verify_github_signature;
use crate::webhook::{MAIN_BRANCH_REF, PushPayload, extract_changes};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ApiStatus {
    pub status: &'static str,
    pub message: String,
}

fn reply(
    code: StatusCode,
    status: &'static str,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiStatus>) {
    (
        code,
        Json(ApiStatus {
            status,
            message: message.into(),
        }),
    )
}

pub async fn root() -> &'static str {
    "firmware_notify"
}

/// Handles the GitHub webhook POST request.
pub async fn handle_webhook(
    AxumState(state): AxumState<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<ApiStatus>) {
    info!("Received webhook request");

    // Signature verification is opt-in; without a configured secret
    // every request is accepted as-is.
    if let Some(secret) = &state.config.webhook_secret {
        let signature = headers
            .get("X-Hub-Signature-256")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !verify_github_signature(secret, &body, signature) {
            error!("Invalid signature");
            return reply(StatusCode::FORBIDDEN, "error", "Invalid signature");
        }
    }

    let payload: PushPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            error!("Empty or unparseable payload: {}", e);
            return reply(StatusCode::BAD_REQUEST, "error", "Empty payload");
        }
    };

    if payload.reference != MAIN_BRANCH_REF {
        info!("Ignoring non-main branch push to '{}'", payload.reference);
        return reply(StatusCode::OK, "ignored", "Not a main branch push");
    }

    if payload.commits.is_empty() {
        info!("No commits found");
        return reply(StatusCode::OK, "ignored", "No commits found");
    }

    info!("Processing {} new commits", payload.commits.len());

    let changes = extract_changes(&payload);
    if changes.is_empty() {
        info!("No reportable changes in this push");
        return reply(StatusCode::OK, "ignored", "No changes detected");
    }

    info!("Sending {} changes to Telegram", changes.len());
    let chunks = build_chunks(&changes, MAX_MESSAGE_LENGTH);
    match state.notifier.send_chunks(&chunks, changes.len()).await {
        Ok((_, delivered)) => reply(
            StatusCode::OK,
            "success",
            format!("Processed {} changes", delivered),
        ),
        Err(e) => {
            error!("Error processing webhook: {}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, "error", e.to_string())
        }
    }
}
