//! Savings-board action proxy.
//!
//! Accepts board actions on `/api/board`, validates their shape and relays
//! them to an n8n automation webhook, which owns all board state.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server (axum + tower-http layers)
//!                 │
//!                 ▼
//!              http::handlers ──▶ board::validate ──▶ webhook::WebhookClient ──▶ n8n
//!                 │                                          │
//!   Client ◀── http::response / webhook::Reply ◀─────────────┘
//!
//!   Cross-cutting: config, observability, lifecycle
//! ```

pub mod board;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod webhook;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
