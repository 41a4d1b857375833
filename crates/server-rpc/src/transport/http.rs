//! Network RPC transport over HTTP(S).
//!
//! Posts the JSON payload to `http(s)://host:port/<endpoint>` and parses the
//! response body as JSON. TLS comes from the scheme and is handled entirely
//! by reqwest; this layer never retries.

use crate::config::RpcConfig;
use crate::error::{Result, RpcError};
use crate::worker::{RpcErrorHandler, RpcResultHandler, RpcWorker};
use serde_json::Value;
use tracing::debug;

fn endpoint_url(host: &str, port: u16, use_tls: bool, endpoint: &str) -> String {
    let scheme = if use_tls { "https" } else { "http" };
    format!(
        "{}://{}:{}/{}",
        scheme,
        host,
        port,
        endpoint.trim_start_matches('/')
    )
}

fn status_err(url: &str, status: u16) -> RpcError {
    RpcError::Transport {
        message: format!("server returned HTTP {} for {}", status, url),
    }
}

fn body_err(url: &str, detail: impl std::fmt::Display) -> RpcError {
    RpcError::Transport {
        message: format!("unreadable RPC response from {}: {}", url, detail),
    }
}

/// Invoke `endpoint` over HTTP(S), blocking until completion.
///
/// Intended for synchronous host threads; must not be called from async
/// context.
pub fn invoke_rpc(
    host: &str,
    port: u16,
    use_tls: bool,
    endpoint: &str,
    request: &Value,
) -> Result<Value> {
    let url = endpoint_url(host, port, use_tls, endpoint);
    debug!("RPC POST {}", url);

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(RpcConfig::CONNECT_TIMEOUT)
        .timeout(RpcConfig::REQUEST_TIMEOUT)
        .build()?;

    let response = client.post(&url).json(request).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_err(&url, status.as_u16()));
    }

    response.json::<Value>().map_err(|e| body_err(&url, e))
}

/// Invoke `endpoint` over HTTP(S) on the shared worker.
///
/// Returns immediately; exactly one of the callbacks runs on the worker.
#[allow(clippy::too_many_arguments)]
pub fn invoke_rpc_async(
    worker: &'static RpcWorker,
    host: String,
    port: u16,
    use_tls: bool,
    endpoint: String,
    request: Value,
    on_result: RpcResultHandler,
    on_error: RpcErrorHandler,
) {
    worker.spawn_call(
        async move { call(&host, port, use_tls, &endpoint, &request).await },
        on_result,
        on_error,
    );
}

async fn call(
    host: &str,
    port: u16,
    use_tls: bool,
    endpoint: &str,
    request: &Value,
) -> Result<Value> {
    let url = endpoint_url(host, port, use_tls, endpoint);
    debug!("async RPC POST {}", url);

    let client = reqwest::Client::builder()
        .connect_timeout(RpcConfig::CONNECT_TIMEOUT)
        .timeout(RpcConfig::REQUEST_TIMEOUT)
        .build()?;

    let response = client.post(&url).json(request).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_err(&url, status.as_u16()));
    }

    response.json::<Value>().await.map_err(|e| body_err(&url, e))
}
