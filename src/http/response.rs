//! Mapping probe outcomes to outward HTTP responses.
//!
//! # Design Decisions
//! - Every error kind is recovered here; nothing panics past the
//!   handler boundary
//! - Validation failures are the caller's fault (400); deadline and
//!   ceiling get their dedicated codes (504, 413); transport failures
//!   are a generic 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::probe::ProbeError;

/// Outward status code per error kind.
pub fn outward_status(err: &ProbeError) -> StatusCode {
    match err {
        ProbeError::InvalidUrl(_)
        | ProbeError::ResolutionFailure { .. }
        | ProbeError::RestrictedAddress { .. } => StatusCode::BAD_REQUEST,
        ProbeError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ProbeError::ResponseTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        ProbeError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Uniform failure body: `{ "success": false, "error": <message> }`.
pub fn failure_response(err: &ProbeError) -> Response {
    tracing::warn!(kind = err.kind(), error = %err, "Probe failed");
    (
        outward_status(err),
        Json(json!({ "success": false, "error": err.to_string() })),
    )
        .into_response()
}
