//! Transport resolution from overlay configuration.
//!
//! The configured server address decides the transport per call: absent
//! means the local socket, a valid URL carries host/port/TLS/path-prefix,
//! and anything that fails URL parsing is taken to be a bare hostname or IP
//! address paired with the configured TCP port. The bare-host fallback is
//! deliberately lenient; resolution never fails.

use crate::config::RpcConfig;
use std::path::PathBuf;
use tracing::warn;
use url::Url;

/// Where and how to reach the server for one call.
///
/// Derived fresh on every invocation; configuration may change between
/// calls, so targets are never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportTarget {
    /// Unix domain socket at a well-known path.
    LocalSocket { path: PathBuf },
    /// TCP/HTTP endpoint. `path_prefix` is prepended to every endpoint name.
    NetworkAddress {
        host: String,
        port: u16,
        use_tls: bool,
        path_prefix: String,
    },
}

impl TransportTarget {
    /// Combine the target's path prefix with an endpoint name.
    ///
    /// The result has no leading slash and exactly one separator between
    /// prefix and endpoint: prefix `/api/` + endpoint `sessions/list` is
    /// `api/sessions/list`.
    pub fn prefixed_endpoint(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        match self {
            TransportTarget::LocalSocket { .. } => endpoint.to_string(),
            TransportTarget::NetworkAddress { path_prefix, .. } => {
                let prefix = path_prefix.trim_matches('/');
                if prefix.is_empty() {
                    endpoint.to_string()
                } else {
                    format!("{}/{}", prefix, endpoint)
                }
            }
        }
    }
}

/// Resolve the transport target from the two overlay options.
///
/// `None` and an empty string are equivalent for both options. This function
/// is pure and total: malformed input selects the bare-host branch, it does
/// not error.
pub fn resolve(server_address: Option<&str>, tcp_port: Option<&str>) -> TransportTarget {
    let address = server_address.unwrap_or("").trim();

    if address.is_empty() {
        return TransportTarget::LocalSocket {
            path: PathBuf::from(RpcConfig::SERVER_RPC_SOCKET_PATH),
        };
    }

    match Url::parse(address) {
        Ok(url) if url.has_host() => TransportTarget::NetworkAddress {
            host: url.host_str().unwrap_or_default().to_string(),
            port: url
                .port_or_known_default()
                .unwrap_or(RpcConfig::DEFAULT_TCP_PORT),
            use_tls: url.scheme() == "https",
            path_prefix: url.path().to_string(),
        },
        // Not a URL - assume a bare hostname or IP address.
        _ => TransportTarget::NetworkAddress {
            host: address.to_string(),
            port: parse_port(tcp_port),
            use_tls: false,
            path_prefix: String::new(),
        },
    }
}

fn parse_port(tcp_port: Option<&str>) -> u16 {
    let Some(port) = tcp_port.map(str::trim).filter(|p| !p.is_empty()) else {
        return RpcConfig::DEFAULT_TCP_PORT;
    };
    port.parse().unwrap_or_else(|_| {
        warn!(
            "Invalid server TCP port {:?}, falling back to {}",
            port,
            RpcConfig::DEFAULT_TCP_PORT
        );
        RpcConfig::DEFAULT_TCP_PORT
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address_selects_local_socket() {
        for port in [None, Some(""), Some("8080"), Some("garbage")] {
            let target = resolve(Some(""), port);
            assert_eq!(
                target,
                TransportTarget::LocalSocket {
                    path: PathBuf::from("/var/run/rstudio-server/rpc.socket"),
                }
            );
        }
    }

    #[test]
    fn test_absent_address_selects_local_socket() {
        let target = resolve(None, Some("8080"));
        assert!(matches!(target, TransportTarget::LocalSocket { .. }));
    }

    #[test]
    fn test_https_url_enables_tls_and_keeps_path() {
        let target = resolve(Some("https://rpc.example.com/api/"), None);
        assert_eq!(
            target,
            TransportTarget::NetworkAddress {
                host: "rpc.example.com".to_string(),
                port: 443,
                use_tls: true,
                path_prefix: "/api/".to_string(),
            }
        );
    }

    #[test]
    fn test_http_url_with_explicit_port() {
        let target = resolve(Some("http://rpc.example.com:9443"), None);
        assert_eq!(
            target,
            TransportTarget::NetworkAddress {
                host: "rpc.example.com".to_string(),
                port: 9443,
                use_tls: false,
                path_prefix: "/".to_string(),
            }
        );
    }

    #[test]
    fn test_bare_hostname_uses_configured_port() {
        let target = resolve(Some("db.internal"), Some("9000"));
        assert_eq!(
            target,
            TransportTarget::NetworkAddress {
                host: "db.internal".to_string(),
                port: 9000,
                use_tls: false,
                path_prefix: String::new(),
            }
        );
    }

    #[test]
    fn test_bare_ip_uses_configured_port() {
        let target = resolve(Some("10.0.0.5"), Some("9000"));
        assert_eq!(
            target,
            TransportTarget::NetworkAddress {
                host: "10.0.0.5".to_string(),
                port: 9000,
                use_tls: false,
                path_prefix: String::new(),
            }
        );
    }

    #[test]
    fn test_unparsable_port_falls_back_to_default() {
        let target = resolve(Some("10.0.0.5"), Some("not-a-port"));
        assert_eq!(
            target,
            TransportTarget::NetworkAddress {
                host: "10.0.0.5".to_string(),
                port: RpcConfig::DEFAULT_TCP_PORT,
                use_tls: false,
                path_prefix: String::new(),
            }
        );
    }

    #[test]
    fn test_prefixed_endpoint_joins_with_single_separator() {
        let target = resolve(Some("https://rpc.example.com/api/"), None);
        assert_eq!(target.prefixed_endpoint("sessions/list"), "api/sessions/list");
    }

    #[test]
    fn test_prefixed_endpoint_without_prefix_is_unchanged() {
        let target = resolve(Some("10.0.0.5"), Some("9000"));
        assert_eq!(target.prefixed_endpoint("ping"), "ping");

        let target = resolve(Some("http://rpc.example.com"), None);
        assert_eq!(target.prefixed_endpoint("ping"), "ping");
    }

    #[test]
    fn test_local_socket_endpoint_is_unprefixed() {
        let target = resolve(None, None);
        assert_eq!(target.prefixed_endpoint("/ping"), "ping");
    }
}
