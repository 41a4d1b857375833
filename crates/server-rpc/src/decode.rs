//! Response envelope decoding for host-facing callers.
//!
//! The invokers return the raw transport value; this layer turns it into a
//! structured outcome. Unparsable input is a malformed response; an envelope
//! carrying an error object becomes an application error holding that object
//! verbatim; otherwise the embedded result value is handed back unchanged.

use crate::config::RpcConfig;
use crate::error::{Result, RpcError};
use crate::protocol::RpcResponse;
use serde_json::Value;

/// Decode a raw RPC response value into its embedded result.
pub fn decode(raw: &Value) -> Result<Value> {
    let response: RpcResponse =
        serde_json::from_value(raw.clone()).map_err(|e| RpcError::MalformedResponse {
            message: format!("could not parse RPC response: {}", e),
        })?;

    emit_debug_echo(raw);

    if response.error.is_some() {
        // The raw object, not a re-serialization; unknown fields survive.
        let error = raw.get("error").cloned().unwrap_or(Value::Null);
        return Err(RpcError::Application { error });
    }

    Ok(response.result.unwrap_or(Value::Null))
}

/// Echo the full decoded envelope when the debug flag is set.
///
/// Side effect only; the decoded outcome is unaffected.
fn emit_debug_echo(raw: &Value) {
    let enabled = std::env::var(RpcConfig::DEBUG_ENV_VAR)
        .map(|v| !v.is_empty())
        .unwrap_or(false);
    if enabled {
        // Intentional stdout: diagnostic echo for interactive debugging.
        println!("<<<");
        println!(
            "{}",
            serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_yields_embedded_value() {
        let value = json!({"sessions": ["a", "b"], "count": 2});
        let raw = serde_json::to_value(RpcResponse::success(Some(json!(1)), value.clone())).unwrap();

        assert_eq!(decode(&raw).unwrap(), value);
    }

    #[test]
    fn test_error_envelope_yields_application_error_verbatim() {
        let raw = json!({
            "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "Method not found", "details": {"hint": "typo?"}},
            "id": 7
        });

        match decode(&raw) {
            Err(RpcError::Application { error }) => {
                assert_eq!(error, raw["error"]);
                // Fields outside the standard error object survive.
                assert_eq!(error["details"]["hint"], json!("typo?"));
            }
            other => panic!("expected Application error, got: {:?}", other),
        }
    }

    #[test]
    fn test_non_envelope_value_is_malformed() {
        for raw in [json!("just a string"), json!(42), json!({"foo": "bar"})] {
            assert!(matches!(
                decode(&raw),
                Err(RpcError::MalformedResponse { .. })
            ));
        }
    }

    #[test]
    fn test_envelope_without_result_yields_null() {
        let raw = json!({"jsonrpc": "2.0", "id": 1});
        assert_eq!(decode(&raw).unwrap(), Value::Null);
    }

    #[test]
    fn test_encode_decode_roundtrip_preserves_value() {
        let value = json!({"nested": {"list": [1, 2, 3]}, "flag": true});
        let raw = serde_json::to_value(RpcResponse::success(None, value.clone())).unwrap();
        assert_eq!(decode(&raw).unwrap(), value);
    }
}
