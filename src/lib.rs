//! SSRF-hardened outbound API endpoint tester.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod probe;
pub mod security;

pub use config::ProbeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use probe::{EndpointConfig, HttpMethod, ProbeError, ProbeExecutor, ProbeReport};
