//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Probe invocation:
//!     → rate_limit.rs (per-client token bucket, inbound)
//!     → ssrf.rs (target classification, outbound)
//!     → Pass to executor
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in stored config's network target; the guard re-checks
//!   every invocation

pub mod rate_limit;
pub mod ssrf;
