//! Probe subsystem: validate and execute one outbound request.
//!
//! # Data Flow
//! ```text
//! EndpointConfig + optional payload
//!     → executor.rs (build URL, run SSRF guard)
//!     → dispatch (deadline-bounded)
//!     → streamed body read (ceiling-bounded)
//!     → ProbeReport | ProbeError
//! ```
//!
//! Invocation states:
//!     Pending → Validating → Rejected
//!     Pending → Validating → Dispatching →
//!         {Timeout | TooLarge | TransportError | Completed}
//!
//! Each invocation is independent and single-shot; the subsystem holds
//! no state across invocations.

pub mod endpoint;
pub mod error;
pub mod executor;
pub mod result;

pub use endpoint::{EndpointConfig, HttpMethod};
pub use error::ProbeError;
pub use executor::ProbeExecutor;
pub use result::ProbeReport;
