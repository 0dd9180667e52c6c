//! SSRF guard for outbound probe targets.
//!
//! # Responsibilities
//! - Reject URLs that are malformed or use a scheme other than http/https
//! - Classify literal IP hostnames without touching DNS
//! - Resolve domain hostnames once and classify the answer
//! - Fail closed: a DNS failure is a validation failure, never "allow"
//!
//! # Design Decisions
//! - Classification is a pure function over `IpAddr`, unit-testable
//! - The resolved address is not pinned for the subsequent connection,
//!   so the check is inherently TOCTOU-racy; it is defense in depth,
//!   not a hard guarantee

use std::net::IpAddr;

use url::{Host, Url};

use crate::net::Resolver;
use crate::probe::error::ProbeError;

/// Returns true when the address is private, loopback, link-local, or
/// otherwise not globally routable.
///
/// IPv4: 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16, 127.0.0.0/8,
/// 169.254.0.0/16, 0.0.0.0/8. IPv6: `::1`, fe80::/10, fc00::/7.
pub fn is_private_ip(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => {
            let [a, b, _, _] = v4.octets();
            matches!(a, 0 | 10 | 127)
                || (a == 172 && (16..=31).contains(&b))
                || (a == 192 && b == 168)
                || (a == 169 && b == 254)
        }
        IpAddr::V6(v6) => {
            if v6.is_loopback() {
                return true;
            }
            let first = v6.segments()[0];
            // fe80::/10 link-local, fc00::/7 unique-local
            (first & 0xffc0) == 0xfe80 || (first & 0xfe00) == 0xfc00
        }
    }
}

/// Validates a fully-constructed URL before any request is dispatched.
///
/// Performs at most one DNS resolution, and only when the hostname is
/// not an IP literal. Never contacts the target itself.
///
/// `allow_private` skips the private-range classification (test/dev
/// escape hatch); scheme and resolution checks still apply.
pub async fn validate_url(
    raw: &str,
    resolver: &dyn Resolver,
    allow_private: bool,
) -> Result<(), ProbeError> {
    let url = Url::parse(raw).map_err(|_| ProbeError::InvalidUrl(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ProbeError::InvalidUrl(format!(
                "scheme '{other}' is not allowed, only http and https"
            )));
        }
    }

    let host = url
        .host()
        .ok_or_else(|| ProbeError::InvalidUrl(format!("URL has no host: {raw}")))?;

    let (address, hostname) = match host {
        Host::Ipv4(addr) => (IpAddr::V4(addr), None),
        Host::Ipv6(addr) => (IpAddr::V6(addr), None),
        Host::Domain(name) => {
            let addr = resolver
                .resolve(name)
                .await
                .map_err(|_| ProbeError::ResolutionFailure {
                    hostname: name.to_string(),
                })?;
            (addr, Some(name.to_string()))
        }
    };

    if !allow_private && is_private_ip(address) {
        tracing::warn!(
            address = %address,
            hostname = hostname.as_deref().unwrap_or("<literal>"),
            "Blocked probe to restricted address"
        );
        return Err(ProbeError::RestrictedAddress { address, hostname });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    struct StaticResolver(IpAddr);

    #[async_trait]
    impl Resolver for StaticResolver {
        async fn resolve(&self, _hostname: &str) -> io::Result<IpAddr> {
            Ok(self.0)
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl Resolver for FailingResolver {
        async fn resolve(&self, hostname: &str) -> io::Result<IpAddr> {
            Err(io::Error::new(io::ErrorKind::NotFound, hostname.to_string()))
        }
    }

    struct CountingResolver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Resolver for CountingResolver {
        async fn resolve(&self, _hostname: &str) -> io::Result<IpAddr> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(IpAddr::from([93, 184, 216, 34]))
        }
    }

    fn v4(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_private_ipv4_ranges() {
        for ip in [
            "10.0.0.1",
            "10.255.255.255",
            "172.16.0.1",
            "172.31.99.1",
            "192.168.1.1",
            "127.0.0.1",
            "127.255.0.1",
            "169.254.10.10",
            "0.0.0.0",
            "0.1.2.3",
        ] {
            assert!(is_private_ip(v4(ip)), "{ip} should classify as private");
        }
    }

    #[test]
    fn test_public_ipv4() {
        for ip in [
            "93.184.216.34",
            "8.8.8.8",
            "172.15.0.1",
            "172.32.0.1",
            "192.169.0.1",
            "169.253.0.1",
            "1.1.1.1",
        ] {
            assert!(!is_private_ip(v4(ip)), "{ip} should classify as public");
        }
    }

    #[test]
    fn test_private_ipv6() {
        for ip in ["::1", "fe80::1", "febf::1", "fc00::1", "fd12:3456::1"] {
            assert!(
                is_private_ip(ip.parse().unwrap()),
                "{ip} should classify as private"
            );
        }
    }

    #[test]
    fn test_public_ipv6() {
        for ip in ["2606:4700:4700::1111", "2001:4860:4860::8888", "fec0::1"] {
            assert!(
                !is_private_ip(ip.parse().unwrap()),
                "{ip} should classify as public"
            );
        }
    }

    #[tokio::test]
    async fn test_disallowed_scheme_fails_before_dns() {
        let resolver = CountingResolver {
            calls: AtomicUsize::new(0),
        };
        let err = validate_url("ftp://example.com/file", &resolver, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidUrl(_)));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_url() {
        let err = validate_url("not a url", &FailingResolver, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_literal_private_ip_skips_dns() {
        let resolver = CountingResolver {
            calls: AtomicUsize::new(0),
        };
        let err = validate_url("http://10.0.0.5/", &resolver, false)
            .await
            .unwrap_err();
        match err {
            ProbeError::RestrictedAddress { address, hostname } => {
                assert_eq!(address, v4("10.0.0.5"));
                assert!(hostname.is_none());
            }
            other => panic!("expected RestrictedAddress, got {other:?}"),
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_hostname_resolving_to_loopback_rejected() {
        let resolver = StaticResolver(v4("127.0.0.1"));
        let err = validate_url("http://internal.test/admin", &resolver, false)
            .await
            .unwrap_err();
        match err {
            ProbeError::RestrictedAddress { address, hostname } => {
                assert_eq!(address, v4("127.0.0.1"));
                assert_eq!(hostname.as_deref(), Some("internal.test"));
            }
            other => panic!("expected RestrictedAddress, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolution_failure_is_rejected() {
        let err = validate_url("https://no-such-host.test/", &FailingResolver, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::ResolutionFailure { .. }));
    }

    #[tokio::test]
    async fn test_public_target_passes() {
        let resolver = StaticResolver(v4("93.184.216.34"));
        validate_url("https://example.com/api?x=1", &resolver, false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ipv6_literal_loopback_rejected() {
        let resolver = CountingResolver {
            calls: AtomicUsize::new(0),
        };
        let err = validate_url("http://[::1]:8080/", &resolver, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::RestrictedAddress { .. }));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_allow_private_skips_classification() {
        let resolver = StaticResolver(v4("127.0.0.1"));
        validate_url("http://localhost:9999/", &resolver, true)
            .await
            .unwrap();
    }
}
