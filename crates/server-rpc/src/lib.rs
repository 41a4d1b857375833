//! Session-to-server RPC dispatch bridge.
//!
//! A session process uses this crate to invoke JSON-RPC procedures on its
//! controlling server process, over either a local Unix domain socket or a
//! TCP/HTTP channel, in blocking and non-blocking forms.
//!
//! - Transport choice is derived fresh on every call from overlay
//!   configuration: no address means the local socket, a full URL carries
//!   host/port/TLS/path-prefix, and anything else is treated as a bare
//!   hostname with the configured TCP port.
//! - Asynchronous calls share one lazily-started background worker that
//!   lives for the rest of the process; `invoke_async` always returns
//!   before its completion callback fires.
//! - Transport failures, malformed envelopes, and application-level error
//!   objects all surface as one typed [`RpcError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use server_rpc::{adapter, OverlayOptions, ServerRpc};
//! use std::sync::Arc;
//!
//! let rpc = ServerRpc::new(Arc::new(HostOptions::new()));
//!
//! // Blocking, decoded: what the embedding-language adapter calls.
//! let status = adapter::invoke_server_rpc(&rpc, "get_status", vec![])?;
//!
//! // Non-blocking: completion callbacks run on the shared worker.
//! rpc.invoke_async(
//!     "ping",
//!     &serde_json::json!({}),
//!     Box::new(|value| println!("pong: {value}")),
//!     Box::new(|err| eprintln!("ping failed: {err}")),
//! );
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod protocol;
pub mod resolver;
pub mod transport;
pub mod worker;

// Re-export commonly used types
pub use client::{OverlayOptions, ServerRpc};
pub use config::RpcConfig;
pub use decode::decode;
pub use error::{Result, RpcError};
pub use resolver::{resolve, TransportTarget};
pub use worker::{RpcErrorHandler, RpcResultHandler, RpcWorker};
