//! Synchronous and asynchronous RPC invokers.
//!
//! `ServerRpc` reads overlay configuration fresh on every call, resolves the
//! transport target, and dispatches to the matching transport. The
//! synchronous path blocks the calling thread and never touches the worker;
//! the asynchronous path resolves on the calling thread, submits to the
//! shared worker, and reports completion through callbacks on the worker.

use crate::config::RpcConfig;
use crate::error::Result;
use crate::resolver::{self, TransportTarget};
use crate::transport::http;
#[cfg(unix)]
use crate::transport::socket;
use crate::worker::{RpcErrorHandler, RpcResultHandler, RpcWorker};
use serde_json::Value;
use std::sync::Arc;

/// Process-wide configuration lookup, supplied by the host.
///
/// `None` and an empty string are equivalent: the option is unset.
pub trait OverlayOptions: Send + Sync {
    fn overlay_option(&self, name: &str) -> Option<String>;
}

/// RPC dispatch bridge to the controlling server process.
pub struct ServerRpc {
    options: Arc<dyn OverlayOptions>,
}

impl ServerRpc {
    pub fn new(options: Arc<dyn OverlayOptions>) -> Self {
        Self { options }
    }

    /// Resolve the transport target from current configuration.
    ///
    /// Recomputed per call; configuration changes take effect on the next
    /// invocation.
    fn resolve_target(&self) -> TransportTarget {
        let address = self.options.overlay_option(RpcConfig::SERVER_ADDRESS_OPTION);
        let port = self.options.overlay_option(RpcConfig::SERVER_TCP_PORT_OPTION);
        resolver::resolve(address.as_deref(), port.as_deref())
    }

    /// Invoke `endpoint` on the server, blocking until completion.
    ///
    /// Returns the raw response value from the transport, unmodified; no
    /// retry, no envelope decoding (see [`crate::decode::decode`]).
    pub fn invoke(&self, endpoint: &str, request: &Value) -> Result<Value> {
        let target = self.resolve_target();
        let full_endpoint = target.prefixed_endpoint(endpoint);

        match target {
            #[cfg(unix)]
            TransportTarget::LocalSocket { path } => socket::invoke_rpc(&path, endpoint, request),
            #[cfg(not(unix))]
            TransportTarget::LocalSocket { path } => Err(crate::error::RpcError::Transport {
                message: format!(
                    "local socket transport is not available on this platform ({})",
                    path.display()
                ),
            }),
            TransportTarget::NetworkAddress {
                host,
                port,
                use_tls,
                ..
            } => http::invoke_rpc(&host, port, use_tls, &full_endpoint, request),
        }
    }

    /// Invoke `endpoint` on the shared worker; returns immediately.
    ///
    /// Exactly one of `on_result` / `on_error` runs, on the worker. The
    /// calling thread always observes `invoke_async` return before either
    /// callback fires.
    pub fn invoke_async(
        &self,
        endpoint: &str,
        request: &Value,
        on_result: RpcResultHandler,
        on_error: RpcErrorHandler,
    ) {
        let worker = RpcWorker::ensure_started();

        // Resolved on the calling thread: configuration is read at submit
        // time, not when the worker gets around to the call.
        let target = self.resolve_target();
        let full_endpoint = target.prefixed_endpoint(endpoint);

        match target {
            #[cfg(unix)]
            TransportTarget::LocalSocket { path } => socket::invoke_rpc_async(
                worker,
                path,
                endpoint.to_string(),
                request.clone(),
                on_result,
                on_error,
            ),
            #[cfg(not(unix))]
            TransportTarget::LocalSocket { path } => worker.spawn_call(
                async move {
                    Err(crate::error::RpcError::Transport {
                        message: format!(
                            "local socket transport is not available on this platform ({})",
                            path.display()
                        ),
                    })
                },
                on_result,
                on_error,
            ),
            TransportTarget::NetworkAddress {
                host,
                port,
                use_tls,
                ..
            } => http::invoke_rpc_async(
                worker,
                host,
                port,
                use_tls,
                full_endpoint,
                request.clone(),
                on_result,
                on_error,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapOptions(Mutex<HashMap<String, String>>);

    impl MapOptions {
        fn new(entries: &[(&str, &str)]) -> Arc<Self> {
            let map = entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Arc::new(Self(Mutex::new(map)))
        }

        fn set(&self, name: &str, value: &str) {
            self.0
                .lock()
                .unwrap()
                .insert(name.to_string(), value.to_string());
        }
    }

    impl OverlayOptions for MapOptions {
        fn overlay_option(&self, name: &str) -> Option<String> {
            self.0.lock().unwrap().get(name).cloned()
        }
    }

    #[test]
    fn test_unset_address_resolves_to_local_socket() {
        let rpc = ServerRpc::new(MapOptions::new(&[("server-tcp-port", "8080")]));
        assert!(matches!(
            rpc.resolve_target(),
            TransportTarget::LocalSocket { .. }
        ));
    }

    #[test]
    fn test_bare_host_resolves_with_configured_port() {
        let rpc = ServerRpc::new(MapOptions::new(&[
            ("server-address", "10.0.0.5"),
            ("server-tcp-port", "9000"),
        ]));
        assert_eq!(
            rpc.resolve_target(),
            TransportTarget::NetworkAddress {
                host: "10.0.0.5".to_string(),
                port: 9000,
                use_tls: false,
                path_prefix: String::new(),
            }
        );
    }

    #[test]
    fn test_target_is_rederived_on_every_call() {
        let options = MapOptions::new(&[]);
        let rpc = ServerRpc::new(options.clone());

        assert!(matches!(
            rpc.resolve_target(),
            TransportTarget::LocalSocket { .. }
        ));

        options.set("server-address", "https://rpc.example.com/api/");
        match rpc.resolve_target() {
            TransportTarget::NetworkAddress { host, use_tls, .. } => {
                assert_eq!(host, "rpc.example.com");
                assert!(use_tls);
            }
            other => panic!("expected NetworkAddress, got: {:?}", other),
        }
    }
}
