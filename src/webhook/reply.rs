//! Translation of the webhook's answer into the proxy's answer.
//!
//! The webhook body is read as text first. JSON is relayed untouched; anything
//! else is wrapped as `{ "ok": <2xx?>, "raw": <text> }`. The upstream status
//! code is preserved either way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Body relayed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    /// Upstream answered with parseable JSON.
    Json(Value),
    /// Upstream answered with something else.
    Raw(RawEnvelope),
}

/// Fallback envelope for non-JSON webhook bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEnvelope {
    pub ok: bool,
    pub raw: String,
}

/// A completed exchange with the webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl Reply {
    pub fn from_upstream(status: StatusCode, text: String) -> Self {
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(json) => ReplyBody::Json(json),
            Err(_) => ReplyBody::Raw(RawEnvelope {
                ok: status.is_success(),
                raw: text,
            }),
        };
        Self { status, body }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.body, ReplyBody::Json(_))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.body {
            ReplyBody::Json(json) => (self.status, Json(json)).into_response(),
            ReplyBody::Raw(envelope) => (self.status, Json(envelope)).into_response(),
        }
    }
}
