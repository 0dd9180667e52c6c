//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound probe target
//!     → resolver.rs (hostname → IP, injectable for tests)
//!     → security/ssrf.rs (classification)
//!     → Hand off to probe executor
//! ```
//!
//! # Design Decisions
//! - Only outbound concerns live here; the inbound listener is handled
//!   by `axum::serve` in the http subsystem
//! - Resolution is behind a trait so the SSRF guard is testable with
//!   fakes and never touches real DNS in unit tests

pub mod resolver;

pub use resolver::{Resolver, SystemResolver};
