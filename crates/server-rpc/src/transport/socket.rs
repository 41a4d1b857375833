//! Local-socket RPC transport.
//!
//! Dials the server's Unix domain socket, writes one length-prefixed JSON
//! request frame, and reads one response frame. A fresh connection is made
//! per call; the transport holds no state between calls.

use crate::config::RpcConfig;
use crate::error::{Result, RpcError};
use crate::protocol::{read_frame, read_frame_blocking, write_frame, write_frame_blocking};
use crate::worker::{RpcErrorHandler, RpcResultHandler, RpcWorker};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

fn encode_request(request: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(|e| RpcError::Transport {
        message: format!("failed to encode RPC request: {}", e),
    })
}

fn parse_wire_response(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| RpcError::Transport {
        message: format!("unreadable RPC response: {}", e),
    })
}

/// Invoke `endpoint` over the local socket, blocking until completion.
///
/// Intended for synchronous host threads; must not be called from async
/// context.
pub fn invoke_rpc(socket_path: &Path, endpoint: &str, request: &Value) -> Result<Value> {
    debug!("RPC {} over local socket {}", endpoint, socket_path.display());

    let request_bytes = encode_request(request)?;

    let mut stream =
        std::os::unix::net::UnixStream::connect(socket_path).map_err(|e| RpcError::Transport {
            message: format!("failed to connect to {}: {}", socket_path.display(), e),
        })?;
    stream.set_read_timeout(Some(RpcConfig::REQUEST_TIMEOUT))?;
    stream.set_write_timeout(Some(RpcConfig::REQUEST_TIMEOUT))?;

    write_frame_blocking(&mut stream, &request_bytes)?;

    let response_bytes = read_frame_blocking(&mut stream)?.ok_or_else(|| RpcError::Transport {
        message: format!("server closed connection during {} call", endpoint),
    })?;

    parse_wire_response(&response_bytes)
}

/// Invoke `endpoint` over the local socket on the shared worker.
///
/// Returns immediately; exactly one of the callbacks runs on the worker.
pub fn invoke_rpc_async(
    worker: &'static RpcWorker,
    socket_path: PathBuf,
    endpoint: String,
    request: Value,
    on_result: RpcResultHandler,
    on_error: RpcErrorHandler,
) {
    worker.spawn_call(
        async move { call(&socket_path, &endpoint, &request).await },
        on_result,
        on_error,
    );
}

async fn call(socket_path: &Path, endpoint: &str, request: &Value) -> Result<Value> {
    debug!("async RPC {} over local socket {}", endpoint, socket_path.display());

    let request_bytes = encode_request(request)?;

    let mut stream = tokio::time::timeout(
        RpcConfig::CONNECT_TIMEOUT,
        tokio::net::UnixStream::connect(socket_path),
    )
    .await
    .map_err(|_| RpcError::Transport {
        message: format!("timed out connecting to {}", socket_path.display()),
    })?
    .map_err(|e| RpcError::Transport {
        message: format!("failed to connect to {}: {}", socket_path.display(), e),
    })?;

    let (mut reader, mut writer) = stream.split();

    write_frame(&mut writer, &request_bytes).await?;

    let response_bytes = read_frame(&mut reader).await?.ok_or_else(|| RpcError::Transport {
        message: format!("server closed connection during {} call", endpoint),
    })?;

    parse_wire_response(&response_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_invoke_missing_socket_is_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.socket");

        let result = invoke_rpc(&path, "ping", &serde_json::json!({}));
        match result {
            Err(RpcError::Transport { message }) => {
                assert!(message.contains("failed to connect"));
            }
            other => panic!("expected Transport error, got: {:?}", other),
        }
    }

    #[test]
    fn test_wire_response_must_be_json() {
        let result = parse_wire_response(b"not json");
        assert!(matches!(result, Err(RpcError::Transport { .. })));

        let value = parse_wire_response(b"{\"jsonrpc\":\"2.0\",\"result\":4,\"id\":1}").unwrap();
        assert_eq!(value["result"], serde_json::json!(4));
    }
}
