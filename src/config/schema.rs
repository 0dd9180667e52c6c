//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML, and all
//! fields have defaults so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

/// Root configuration for the probe service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Listener configuration (bind address, inbound limits).
    pub listener: ListenerConfig,

    /// Outbound probe limits (deadline, size ceiling).
    pub probe: ProbeLimits,

    /// Per-client rate limiting for probe invocations.
    pub rate_limit: RateLimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Deadline for one inbound request, including the outbound probe
    /// it triggers. Must exceed the probe timeout.
    pub request_timeout_secs: u64,

    /// Maximum inbound body size in bytes (test payloads are small).
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Limits applied to every outbound probe invocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeLimits {
    /// Deadline in seconds covering dispatch and the full body read.
    pub timeout_secs: u64,

    /// Response-size ceiling in bytes, enforced both via the
    /// Content-Length precheck and while streaming.
    pub max_response_bytes: u64,

    /// Skip the private-range classification. Test/dev escape hatch:
    /// scheme and DNS-resolution checks still apply.
    pub allow_private_networks: bool,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_response_bytes: 5 * 1024 * 1024,
            allow_private_networks: false,
        }
    }
}

/// Per-client rate limiting for probe invocations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Sustained invocations per second per client.
    pub rps: u32,

    /// Burst capacity per client.
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rps: 5,
            burst: 10,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter; `RUST_LOG` overrides it.
    pub log_filter: String,

    pub metrics_enabled: bool,

    /// Bind address for the Prometheus exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "api_probe=info,tower_http=warn".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
