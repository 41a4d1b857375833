//! Process-wide background execution context for asynchronous RPC.
//!
//! One worker serves all asynchronous calls for the life of the process. It
//! is created lazily on first use, never torn down, and never restarted.
//! The runtime lives in a process-lifetime static, so its single worker
//! thread parks when idle instead of exiting.
//!
//! # Thread Safety
//!
//! First use may race from any number of threads; `OnceLock` guarantees
//! exactly one runtime is ever built and every caller gets the same context.

use crate::config::RpcConfig;
use crate::error::{Result, RpcError};
use serde_json::Value;
use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::debug;

/// Completion callback for a successful asynchronous call.
pub type RpcResultHandler = Box<dyn FnOnce(Value) + Send + 'static>;

/// Completion callback for a failed asynchronous call.
pub type RpcErrorHandler = Box<dyn FnOnce(RpcError) + Send + 'static>;

static WORKER: OnceLock<RpcWorker> = OnceLock::new();

/// The shared RPC worker: a tokio runtime with a single named worker thread.
pub struct RpcWorker {
    runtime: Runtime,
}

impl RpcWorker {
    /// Return the shared worker, starting it on first call.
    ///
    /// Safe to call on every invocation; after the first call this is a
    /// cheap static read. Returns once the initialization decision is made
    /// and the worker thread is launched; it does not wait for the worker to
    /// process anything.
    ///
    /// # Panics
    ///
    /// Panics if the runtime cannot be built. Losing the worker leaves the
    /// process without asynchronous RPC for its whole lifetime; that is
    /// unrecoverable and must not be papered over.
    pub fn ensure_started() -> &'static RpcWorker {
        WORKER.get_or_init(|| {
            let runtime = Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name(RpcConfig::WORKER_THREAD_NAME)
                .enable_all()
                .build()
                .expect("failed to launch RPC worker thread");
            debug!("RPC worker started");
            RpcWorker { runtime }
        })
    }

    /// Enqueue a unit of work onto the shared worker.
    ///
    /// Execution happens asynchronously on the worker thread, never inline:
    /// `submit` always returns before the work runs. With one worker thread,
    /// submitted work is serialized.
    pub fn submit<F>(&self, work: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.runtime.spawn(work)
    }

    /// Submit an RPC call future and route its outcome to exactly one of
    /// the two callbacks, on the worker.
    pub fn spawn_call<F>(&self, call: F, on_result: RpcResultHandler, on_error: RpcErrorHandler)
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        self.submit(async move {
            match call.await {
                Ok(value) => on_result(value),
                Err(e) => on_error(e),
            }
        });
    }
}
