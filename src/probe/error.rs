//! Probe error taxonomy.
//!
//! Every failure mode of a probe invocation maps to exactly one variant
//! here. The executor never lets an error escape as a panic or a raw
//! transport error; the HTTP layer picks the outward status code per
//! variant (see `http::response`).

use std::net::IpAddr;
use thiserror::Error;

/// Errors that can occur while validating or executing a probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// URL failed to parse, has no host, or uses a scheme other than
    /// http/https. Non-retryable.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// DNS resolution failed. Treated as a validation failure, never as
    /// a transient error: an unresolvable target must not fall through
    /// to "allow".
    #[error("failed to resolve hostname: {hostname}")]
    ResolutionFailure { hostname: String },

    /// Target resolves to a private, loopback, link-local, or otherwise
    /// restricted address. Security-significant; never overridden.
    #[error("access to restricted address {address}{} is forbidden", .hostname.as_ref().map(|h| format!(" (resolved from {h})")).unwrap_or_default())]
    RestrictedAddress {
        address: IpAddr,
        /// Hostname the address was resolved from; `None` when the URL
        /// carried an IP literal.
        hostname: Option<String>,
    },

    /// The invocation exceeded the configured deadline.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Response exceeded the size ceiling, either via its declared
    /// Content-Length or while streaming the body.
    #[error("response exceeded maximum size of {0} bytes")]
    ResponseTooLarge(u64),

    /// Any other network or protocol failure (connection refused, TLS
    /// failure, reset mid-stream). Carries the underlying message.
    #[error("request failed: {0}")]
    Transport(String),
}

impl ProbeError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::InvalidUrl(_) => "invalid_url",
            ProbeError::ResolutionFailure { .. } => "resolution_failure",
            ProbeError::RestrictedAddress { .. } => "restricted_address",
            ProbeError::Timeout(_) => "timeout",
            ProbeError::ResponseTooLarge(_) => "response_too_large",
            ProbeError::Transport(_) => "transport",
        }
    }
}
