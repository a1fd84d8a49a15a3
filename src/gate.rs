//! # Bounded Serialization Gate
//!
//! Process-wide mutual exclusion with a bounded acquisition wait, used to
//! serialize ledger request submission so only one such request from this
//! process is in flight against the consensus pool at a time. This is a
//! process-local throttle, not a pool-protocol requirement.
//!
//! Acquisition that times out fails the call without running the body; the
//! gate never proceeds unlocked.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The lock was not acquired within the bound; the guarded body did not
    /// run.
    #[error("gate not acquired within {waited:?}")]
    AcquireTimeout { waited: Duration },
}

/// Counters exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateMetrics {
    pub acquired: u64,
    pub timed_out: u64,
}

#[derive(Debug)]
pub struct SerializationGate {
    lock: Mutex<()>,
    acquire_timeout: Duration,
    acquired: AtomicU64,
    timed_out: AtomicU64,
}

impl SerializationGate {
    pub fn new(acquire_timeout: Duration) -> Self {
        Self {
            lock: Mutex::new(()),
            acquire_timeout,
            acquired: AtomicU64::new(0),
            timed_out: AtomicU64::new(0),
        }
    }

    pub fn with_default_timeout() -> Self {
        Self::new(DEFAULT_ACQUIRE_TIMEOUT)
    }

    /// Run `body` under the gate using the configured acquisition timeout.
    pub fn with_exclusive_access<T>(&self, body: impl FnOnce() -> T) -> Result<T, GateError> {
        self.with_exclusive_access_timeout(self.acquire_timeout, body)
    }

    /// Run `body` under the gate, waiting at most `timeout` to acquire it.
    ///
    /// The guard lives on this stack frame, so the lock is released on every
    /// exit path of `body`, including unwinding. Not re-entrant; callers
    /// must not block on another handle's completion while holding it.
    pub fn with_exclusive_access_timeout<T>(
        &self,
        timeout: Duration,
        body: impl FnOnce() -> T,
    ) -> Result<T, GateError> {
        let Some(guard) = self.lock.try_lock_for(timeout) else {
            self.timed_out.fetch_add(1, Ordering::Relaxed);
            warn!(timeout_ms = timeout.as_millis() as u64, "gate acquisition timed out");
            return Err(GateError::AcquireTimeout { waited: timeout });
        };
        self.acquired.fetch_add(1, Ordering::Relaxed);
        debug!("gate acquired");
        let out = body();
        drop(guard);
        Ok(out)
    }

    pub fn metrics(&self) -> GateMetrics {
        GateMetrics {
            acquired: self.acquired.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
        }
    }
}

impl Default for SerializationGate {
    fn default() -> Self {
        Self::with_default_timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn bodies_never_overlap() {
        let gate = Arc::new(SerializationGate::new(Duration::from_secs(5)));
        let inside = Arc::new(AtomicBool::new(false));

        let mut joins = Vec::new();
        for _ in 0..4 {
            let gate = Arc::clone(&gate);
            let inside = Arc::clone(&inside);
            joins.push(thread::spawn(move || {
                for _ in 0..50 {
                    gate.with_exclusive_access(|| {
                        assert!(!inside.swap(true, Ordering::SeqCst), "overlapping bodies");
                        thread::sleep(Duration::from_micros(200));
                        inside.store(false, Ordering::SeqCst);
                    })
                    .unwrap();
                }
            }));
        }
        for join in joins {
            join.join().unwrap();
        }
        assert_eq!(gate.metrics().acquired, 200);
    }

    #[test]
    fn timeout_fails_without_running_the_body() {
        let gate = Arc::new(SerializationGate::new(Duration::from_millis(30)));

        let holder = Arc::clone(&gate);
        let join = thread::spawn(move || {
            holder
                .with_exclusive_access(|| thread::sleep(Duration::from_millis(200)))
                .unwrap();
        });
        // Let the holder take the lock first.
        thread::sleep(Duration::from_millis(50));

        let ran = AtomicBool::new(false);
        let result = gate.with_exclusive_access(|| ran.store(true, Ordering::SeqCst));
        assert!(matches!(result, Err(GateError::AcquireTimeout { .. })));
        assert!(!ran.load(Ordering::SeqCst));
        assert_eq!(gate.metrics().timed_out, 1);

        join.join().unwrap();
    }

    #[test]
    fn released_on_unwind() {
        let gate = SerializationGate::new(Duration::from_millis(100));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = gate.with_exclusive_access(|| -> u32 { panic!("body failed") });
        }));
        assert!(result.is_err());

        // Lock must be free again.
        gate.with_exclusive_access(|| {}).unwrap();
    }
}
