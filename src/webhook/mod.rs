//! Upstream automation webhook.
//!
//! # Data Flow
//! ```text
//! ActionRequest
//!     → client.rs (POST JSON, optional x-webhook-secret, bounded by timeouts)
//!     → transport failure? → UpstreamError (caller answers 502)
//!     → reply.rs (text → JSON passthrough | raw envelope, status preserved)
//! ```

pub mod client;
pub mod reply;

pub use client::{ClientSettings, UpstreamError, WebhookClient, SECRET_HEADER};
pub use reply::{RawEnvelope, Reply, ReplyBody};
