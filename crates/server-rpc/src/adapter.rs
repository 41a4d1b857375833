//! Host-facing adapter for embedding-language callers.
//!
//! The embedding language's foreign-call layer supplies a method name and a
//! positional argument list and receives either the decoded result value or
//! an [`RpcError`] whose `Display` is the human-readable message to signal.
//! This entry point always takes the synchronous path; asynchronous
//! invocation is reserved for internal callers that bring their own
//! callbacks.

use crate::client::ServerRpc;
use crate::decode;
use crate::error::{Result, RpcError};
use crate::protocol::RpcRequest;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Build a JSON-RPC request envelope from a method name and argument list.
pub fn format_rpc_request(method: &str, args: Vec<Value>) -> RpcRequest {
    let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
    RpcRequest::new(method, Value::Array(args), id)
}

/// Invoke a server method on behalf of the embedding language.
///
/// Formats the request, performs the blocking invocation, and decodes the
/// response envelope. All three error kinds surface as [`RpcError`].
pub fn invoke_server_rpc(rpc: &ServerRpc, method: &str, args: Vec<Value>) -> Result<Value> {
    let request = format_rpc_request(method, args);
    let payload = serde_json::to_value(&request).map_err(|e| RpcError::Transport {
        message: format!("failed to encode RPC request: {}", e),
    })?;

    let raw = rpc.invoke(method, &payload)?;
    decode::decode(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_rpc_request_carries_positional_args() {
        let request = format_rpc_request("set_option", vec![json!("name"), json!(42)]);

        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.method, "set_option");
        assert_eq!(request.params, Some(json!(["name", 42])));
        assert!(request.id.is_some());
    }

    #[test]
    fn test_request_ids_are_distinct() {
        let a = format_rpc_request("ping", vec![]);
        let b = format_rpc_request("ping", vec![]);
        assert_ne!(a.id, b.id);
    }
}
