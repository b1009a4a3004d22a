//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the board handlers
//! - Wire up middleware (request ID, tracing, timeout, response headers)
//! - Build the webhook client shared by all requests
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::handlers;
use crate::http::request::{request_id, UuidRequestId};
use crate::lifecycle::shutdown;
use crate::webhook::{UpstreamError, WebhookClient};

/// Path of the board endpoint.
pub const BOARD_ROUTE: &str = "/api/board";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no webhook URL is configured.
    pub webhook: Option<Arc<WebhookClient>>,
    pub max_body_size: usize,
}

impl AppState {
    pub fn from_config(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let webhook = WebhookClient::from_config(&config.webhook, &config.timeouts)?;
        Ok(Self {
            webhook: webhook.map(Arc::new),
            max_body_size: config.security.max_body_size,
        })
    }
}

/// HTTP server for the board proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let state = AppState::from_config(&config)?;
        if state.webhook.is_none() {
            tracing::warn!("No webhook URL configured; board actions will be rejected");
        }

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route(
                BOARD_ROUTE,
                get(handlers::health).post(handlers::submit_action),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = request_id(request.headers()).unwrap_or("unknown"),
                    )
                }),
            );

        if config.security.response_headers {
            router = router
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                ));
        }

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route = BOARD_ROUTE,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
