//! Error envelopes returned by the board endpoint.
//!
//! Every failure renders as `{ "ok": false, "error": <message> }`, with
//! `details` added for validation failures. Messages are part of the public
//! contract; callers match on them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::board::ValidationIssue;
use crate::config::loader::WEBHOOK_URL_VAR;
use crate::webhook::UpstreamError;

/// Failures of the submit-action operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing {} in environment.", WEBHOOK_URL_VAR)]
    MissingWebhook,

    #[error("Invalid JSON body.")]
    InvalidJson,

    #[error("Request body too large.")]
    BodyTooLarge,

    #[error("Invalid payload.")]
    InvalidPayload(Vec<ValidationIssue>),

    #[error("Could not reach n8n webhook.")]
    Unreachable(#[source] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingWebhook => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidJson | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Metric label.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::MissingWebhook => "config_error",
            ApiError::InvalidJson => "invalid_json",
            ApiError::BodyTooLarge => "body_too_large",
            ApiError::InvalidPayload(_) => "invalid_payload",
            ApiError::Unreachable(_) => "upstream_unreachable",
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(error: UpstreamError) -> Self {
        ApiError::Unreachable(error)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationIssue>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let details = match self {
            ApiError::InvalidPayload(issues) => Some(issues),
            _ => None,
        };
        (
            status,
            Json(ErrorBody {
                ok: false,
                error,
                details,
            }),
        )
            .into_response()
    }
}
