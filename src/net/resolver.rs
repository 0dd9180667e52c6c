//! DNS resolution behind a trait so the SSRF guard can be exercised
//! with fakes in tests.

use std::io;
use std::net::IpAddr;

use async_trait::async_trait;
use tokio::net::lookup_host;

/// Resolves a hostname to a single IP address.
///
/// The guard only needs one address: the system resolver returns the
/// first answer, mirroring what the subsequent connection attempt will
/// use in the common case.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, hostname: &str) -> io::Result<IpAddr>;
}

/// Resolver backed by the operating system (via tokio's threadpool
/// `getaddrinfo` wrapper).
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> io::Result<IpAddr> {
        let mut addrs = lookup_host((hostname, 0)).await?;
        addrs
            .next()
            .map(|sock| sock.ip())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no addresses returned"))
    }
}
