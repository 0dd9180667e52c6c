//! Lifecycle management: startup wiring and graceful shutdown.

pub mod shutdown;

pub use shutdown::Shutdown;
