//! # Correlation Broker
//!
//! Bridges asynchronous native-library completions into ordinary blocking
//! calls. `begin()` allocates a correlation handle and registers a
//! single-delivery sink; the caller passes the handle into a native entry
//! point and blocks reading the sink; `complete()`, driven by the native
//! completion callback or synthesized locally when dispatch fails before
//! any asynchronous work was scheduled, delivers exactly one outcome to the
//! waiting caller.
//!
//! The invariant the whole design hangs on: every `begin()` is paired with
//! exactly one eventual `complete()`. The composed [`CorrelationBroker::invoke`]
//! upholds it for both the real-callback and the dispatch-failure path.

pub mod handle;
pub mod registry;
pub mod sink;

pub use handle::{CommandHandle, HandleAllocator};
pub use registry::PendingCallRegistry;
pub use sink::{completion_channel, CompletionSender, CompletionSink, SinkError};

use crate::codes::ErrorCode;
use crate::error::{BridgeError, Result};
use crate::payload::{CallbackPayload, NativeError, Outcome};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Global broker used by the extern "C" callback shims, which receive no
/// context pointer and can only correlate through the handle.
static GLOBAL_BROKER: OnceLock<Arc<CorrelationBroker>> = OnceLock::new();

#[derive(Debug, Default)]
pub struct CorrelationBroker {
    allocator: HandleAllocator,
    registry: PendingCallRegistry,
}

impl CorrelationBroker {
    pub fn new() -> Self {
        Self {
            allocator: HandleAllocator::new(),
            registry: PendingCallRegistry::new(),
        }
    }

    /// Get or create the process-global broker. Instances created with
    /// [`CorrelationBroker::new`] stay fully independent; the global exists
    /// for callback shims that have no other way to reach a broker.
    pub fn global() -> Arc<CorrelationBroker> {
        GLOBAL_BROKER
            .get_or_init(|| Arc::new(CorrelationBroker::new()))
            .clone()
    }

    /// Allocate a handle, create a fresh sink, and register the pair.
    ///
    /// Registration finishes before the handle is returned, so a completion
    /// arriving the instant the native call sees the handle always finds the
    /// entry.
    pub fn begin(&self) -> (CommandHandle, CompletionSink) {
        let handle = self.allocator.next();
        let (sender, sink) = completion_channel();
        self.registry.register(handle, sender);
        debug!(handle, pending = self.registry.len(), "operation registered");
        (handle, sink)
    }

    /// Deliver the outcome for `handle` and remove its entry.
    ///
    /// Unknown handles are a logged no-op: the entry may already have been
    /// completed, or the native collaborator fired a stray callback. Nobody
    /// is waiting, so there is nobody to surface it to.
    pub fn complete(&self, handle: CommandHandle, outcome: Outcome) {
        match self.registry.take(handle) {
            Some(sender) => {
                debug!(handle, success = outcome.is_ok(), "operation completed");
                sender.deliver(outcome);
            }
            None => {
                warn!(handle, "completion for unknown handle ignored");
            }
        }
    }

    /// The full blocking call pattern: begin, dispatch, await one outcome.
    ///
    /// `dispatch` receives the fresh handle and returns the native entry
    /// point's immediate status. Zero means a callback will eventually fire
    /// for the handle; non-zero means no callback will ever fire, and the
    /// failure is synthesized here through the same `complete()` path a real
    /// callback takes. The buffered sink slot makes the inline synthetic
    /// send non-blocking, so this cannot deadlock the issuing thread.
    pub fn invoke<F>(&self, dispatch: F) -> Result<CallbackPayload>
    where
        F: FnOnce(CommandHandle) -> ErrorCode,
    {
        let (handle, sink) = self.begin();
        self.dispatch_with_synthetic_failure(handle, dispatch);
        self.resolve(handle, sink.wait())
    }

    /// [`CorrelationBroker::invoke`] with a cap on the wait for the outcome.
    ///
    /// On timeout the wait is abandoned and [`BridgeError::ResponseTimeout`]
    /// is returned; the pending entry still resolves through the normal
    /// completion path whenever the callback fires.
    pub fn invoke_timeout<F>(&self, dispatch: F, wait_cap: Duration) -> Result<CallbackPayload>
    where
        F: FnOnce(CommandHandle) -> ErrorCode,
    {
        let (handle, sink) = self.begin();
        self.dispatch_with_synthetic_failure(handle, dispatch);
        self.resolve(handle, sink.wait_timeout(wait_cap))
    }

    fn dispatch_with_synthetic_failure<F>(&self, handle: CommandHandle, dispatch: F)
    where
        F: FnOnce(CommandHandle) -> ErrorCode,
    {
        let status = dispatch(handle);
        if !status.is_success() {
            // The native call never scheduled any asynchronous work, so no
            // callback will ever fire for this handle. Complete it ourselves
            // so the caller's read has exactly one failure-handling path.
            debug!(handle, code = status.0, "dispatch failed, synthesizing completion");
            self.complete(handle, Err(NativeError::from_code(status)));
        }
    }

    fn resolve(
        &self,
        handle: CommandHandle,
        waited: std::result::Result<Outcome, SinkError>,
    ) -> Result<CallbackPayload> {
        match waited {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(native)) => Err(BridgeError::Native(native)),
            Err(SinkError::Timeout(cap)) => Err(BridgeError::ResponseTimeout(format!(
                "handle {handle}: no outcome within {cap:?}"
            ))),
            Err(SinkError::Disconnected) => Err(BridgeError::CompletionLost(format!(
                "handle {handle}: completion channel disconnected"
            ))),
        }
    }

    /// Number of operations currently awaiting completion.
    pub fn pending_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_pending(&self, handle: CommandHandle) -> bool {
        self.registry.contains(handle)
    }
}
