//! HTTP service surface.
//!
//! # Data Flow
//! ```text
//! POST /probe
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs (decode ProbeRequest, invoke executor)
//!     → response.rs (map outcome to outward status and body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::HttpServer;
