//! Board endpoint handlers.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::LengthLimitError;
use serde::Serialize;
use serde_json::Value;

use crate::board;
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::webhook::Reply;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub message: &'static str,
}

/// `GET /api/board`. Independent of configuration.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        ok: true,
        message: "API route is live. Use POST /api/board for actions.",
    })
}

/// `POST /api/board`.
pub async fn submit_action(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request_id = request_id(&headers);

    match forward_action(&state, request_id, body).await {
        Ok(reply) => {
            tracing::info!(
                request_id = request_id.unwrap_or("unknown"),
                status = %reply.status,
                json = reply.is_json(),
                "Relayed webhook reply"
            );
            metrics::record_request("relayed", reply.status.as_u16());
            reply.into_response()
        }
        Err(error) => {
            match &error {
                ApiError::Unreachable(cause) => tracing::error!(
                    request_id = request_id.unwrap_or("unknown"),
                    error = %cause,
                    "Could not reach webhook"
                ),
                ApiError::MissingWebhook => tracing::error!(
                    request_id = request_id.unwrap_or("unknown"),
                    "Webhook URL not configured"
                ),
                ApiError::InvalidPayload(issues) => tracing::warn!(
                    request_id = request_id.unwrap_or("unknown"),
                    issues = issues.len(),
                    "Rejected invalid payload"
                ),
                other => tracing::warn!(
                    request_id = request_id.unwrap_or("unknown"),
                    reason = %other,
                    "Rejected request body"
                ),
            }
            metrics::record_request(error.outcome(), error.status().as_u16());
            error.into_response()
        }
    }
}

/// Configuration check, body parse, validation, forward. Each step short-circuits.
async fn forward_action(
    state: &AppState,
    request_id: Option<&str>,
    body: Body,
) -> Result<Reply, ApiError> {
    let webhook = state.webhook.as_ref().ok_or(ApiError::MissingWebhook)?;

    let bytes = to_bytes(body, state.max_body_size).await.map_err(|e| {
        if e.into_inner().downcast_ref::<LengthLimitError>().is_some() {
            ApiError::BodyTooLarge
        } else {
            ApiError::InvalidJson
        }
    })?;

    let json = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    let payload: Value = serde_json::from_slice(json).map_err(|_| ApiError::InvalidJson)?;
    let action = board::validate(&payload).map_err(ApiError::InvalidPayload)?;

    tracing::debug!(
        request_id = request_id.unwrap_or("unknown"),
        action = %action.action,
        username = %action.username,
        "Forwarding board action"
    );

    Ok(webhook.forward(&action, request_id).await?)
}
