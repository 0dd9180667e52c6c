//! Probe result shape returned to callers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one completed request/response exchange.
///
/// Only exists when the exchange ran to completion; validation and
/// transport failures surface as `ProbeError` instead, and the HTTP
/// layer renders those as `{ "success": false, "error": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    /// True iff the response status was in the 2xx success range.
    pub success: bool,

    pub status: u16,

    pub status_text: String,

    /// Wall-clock time in milliseconds from dispatch to the body being
    /// fully read.
    pub response_time: u64,

    /// Response headers flattened to a map; on duplicate names the last
    /// value wins.
    pub headers: HashMap<String, String>,

    /// Decoded body: parsed JSON when the content type indicates JSON
    /// and the body parses, the raw text otherwise, absent for empty
    /// bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
