//! # Gated Request Submission
//!
//! Serializes ledger-style request submission across the process: one
//! request at a time holds the gate for its full dispatch/await round trip.
//! Effectively single-flight by design, which is what makes holding the
//! gate across the blocking sink read acceptable here.

use crate::broker::{CommandHandle, CorrelationBroker};
use crate::codes::ErrorCode;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::gate::{GateError, SerializationGate};
use crate::payload::CallbackPayload;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{info, warn};

static GLOBAL_SUBMITTER: OnceLock<Arc<RequestSubmitter>> = OnceLock::new();

#[derive(Debug)]
pub struct RequestSubmitter {
    broker: Arc<CorrelationBroker>,
    gate: SerializationGate,
    response_wait_cap: Option<Duration>,
    submitted: AtomicU64,
}

impl RequestSubmitter {
    pub fn new(broker: Arc<CorrelationBroker>, config: &BridgeConfig) -> Self {
        Self {
            broker,
            gate: SerializationGate::new(config.gate_acquire_timeout()),
            response_wait_cap: config.response_wait_cap(),
            submitted: AtomicU64::new(0),
        }
    }

    /// Get or create the process-global submitter, bound to the global
    /// broker and environment configuration.
    pub fn global() -> Arc<RequestSubmitter> {
        GLOBAL_SUBMITTER
            .get_or_init(|| {
                let config = BridgeConfig::from_env().unwrap_or_else(|err| {
                    warn!(%err, "invalid bridge configuration, using defaults");
                    BridgeConfig::default()
                });
                info!(
                    gate_acquire_timeout_ms = config.gate_acquire_timeout_ms,
                    "request submitter initialized"
                );
                Arc::new(RequestSubmitter::new(CorrelationBroker::global(), &config))
            })
            .clone()
    }

    /// Submit one request: acquire the gate (bounded), run a full
    /// begin/dispatch/await round trip under it, release.
    ///
    /// `dispatch` receives the correlation handle and returns the native
    /// entry point's immediate status, exactly as with
    /// [`CorrelationBroker::invoke`].
    pub fn submit<F>(&self, dispatch: F) -> Result<CallbackPayload>
    where
        F: FnOnce(CommandHandle) -> ErrorCode,
    {
        let gated = self.gate.with_exclusive_access(|| match self.response_wait_cap {
            Some(cap) => self.broker.invoke_timeout(dispatch, cap),
            None => self.broker.invoke(dispatch),
        });
        match gated {
            Ok(outcome) => {
                self.submitted.fetch_add(1, Ordering::Relaxed);
                outcome
            }
            Err(GateError::AcquireTimeout { waited }) => Err(BridgeError::GateTimeout(format!(
                "submission gate not acquired within {waited:?}"
            ))),
        }
    }

    /// Requests that made it through the gate (successful or not).
    pub fn submitted_count(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    pub fn gate_metrics(&self) -> crate::gate::GateMetrics {
        self.gate.metrics()
    }
}
