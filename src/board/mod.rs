//! Board action payloads.
//!
//! # Data Flow
//! ```text
//! request body bytes
//!     → serde_json::Value (syntax)
//!     → validation.rs (shape, per-field issues)
//!     → ActionRequest (typed, forwarded as-is)
//! ```
//!
//! No board state lives here. The automation webhook owns boards, members
//! and items; this module only decides whether a payload is well formed.

pub mod types;
pub mod validation;

pub use types::{Action, ActionRequest};
pub use validation::{validate, IssueCode, ValidationIssue};
