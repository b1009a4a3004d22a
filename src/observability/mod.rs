//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the webhook client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through spans and is forwarded upstream
//! - Metrics are cheap (no recorder installed means no work)

pub mod logging;
pub mod metrics;
