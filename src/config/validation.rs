//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ceilings > 0)
//! - Check addresses parse before anything binds to them
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProbeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ProbeConfig;

/// One semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    ZeroProbeTimeout,
    ZeroResponseCeiling,
    RequestTimeoutBelowProbeTimeout { request: u64, probe: u64 },
    ZeroRateLimit,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address '{addr}' is not a valid socket address")
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address '{addr}' is not a valid socket address")
            }
            ValidationError::ZeroProbeTimeout => {
                write!(f, "probe.timeout_secs must be greater than zero")
            }
            ValidationError::ZeroResponseCeiling => {
                write!(f, "probe.max_response_bytes must be greater than zero")
            }
            ValidationError::RequestTimeoutBelowProbeTimeout { request, probe } => {
                write!(
                    f,
                    "listener.request_timeout_secs ({request}) must exceed probe.timeout_secs ({probe})"
                )
            }
            ValidationError::ZeroRateLimit => {
                write!(f, "rate_limit.rps and rate_limit.burst must be greater than zero when enabled")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if config.probe.max_response_bytes == 0 {
        errors.push(ValidationError::ZeroResponseCeiling);
    }

    if config.listener.request_timeout_secs <= config.probe.timeout_secs {
        errors.push(ValidationError::RequestTimeoutBelowProbeTimeout {
            request: config.listener.request_timeout_secs,
            probe: config.probe.timeout_secs,
        });
    }

    if config.rate_limit.enabled && (config.rate_limit.rps == 0 || config.rate_limit.burst == 0) {
        errors.push(ValidationError::ZeroRateLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        validate_config(&ProbeConfig::default()).unwrap();
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ProbeConfig::default();
        config.listener.bind_address = "nonsense".into();
        config.probe.timeout_secs = 0;
        config.probe.max_response_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroProbeTimeout));
        assert!(errors.contains(&ValidationError::ZeroResponseCeiling));
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_request_timeout_must_exceed_probe_timeout() {
        let mut config = ProbeConfig::default();
        config.listener.request_timeout_secs = 5;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::RequestTimeoutBelowProbeTimeout { .. }
        ));
    }

    #[test]
    fn test_rate_limit_values_checked_only_when_enabled() {
        let mut config = ProbeConfig::default();
        config.rate_limit.enabled = false;
        config.rate_limit.rps = 0;
        validate_config(&config).unwrap();
    }
}
