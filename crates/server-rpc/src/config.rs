//! Centralized configuration constants for the RPC bridge.

use std::time::Duration;

/// Well-known names and limits for server RPC.
pub struct RpcConfig;

impl RpcConfig {
    /// Fixed path of the server's local RPC socket, used whenever no server
    /// address is configured.
    pub const SERVER_RPC_SOCKET_PATH: &'static str = "/var/run/rstudio-server/rpc.socket";

    /// Overlay option holding the server address (URL, bare host, or empty).
    pub const SERVER_ADDRESS_OPTION: &'static str = "server-address";

    /// Overlay option holding the TCP port used with a bare-host address.
    pub const SERVER_TCP_PORT_OPTION: &'static str = "server-tcp-port";

    /// Port used when the overlay port option is absent or unparsable.
    pub const DEFAULT_TCP_PORT: u16 = 8787;

    /// Upper bound on a single RPC frame (16 MB).
    pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

    /// Timeout for establishing a transport connection.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Timeout for a complete request/response exchange.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Environment variable that, when set non-empty, echoes decoded
    /// response envelopes to stdout.
    pub const DEBUG_ENV_VAR: &'static str = "RSTUDIO_SESSION_RPC_DEBUG";

    /// Name of the shared background worker thread.
    pub const WORKER_THREAD_NAME: &'static str = "server-rpc-worker";
}
