//! Single-delivery handoff between a completion path and a waiting caller.
//!
//! A capacity-1 channel whose sender is consumed on delivery: the completion
//! path can never block (even if the reader has not started waiting or gave
//! up), and double delivery is unrepresentable.

use crate::payload::Outcome;
use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tracing::debug;

/// Create a linked sender/sink pair for one pending operation.
pub fn completion_channel() -> (CompletionSender, CompletionSink) {
    let (tx, rx) = bounded(1);
    (CompletionSender { tx }, CompletionSink { rx })
}

/// Errors observable by the waiting side of a sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The sender was dropped without delivering. Indicates the broker was
    /// torn down while the operation was pending.
    #[error("completion channel disconnected before an outcome was delivered")]
    Disconnected,
    /// The reader gave up waiting. The outcome, when it arrives, is absorbed
    /// by the buffered slot.
    #[error("no outcome delivered within {0:?}")]
    Timeout(Duration),
}

/// Write half: held by the pending-call registry until completion.
#[derive(Debug)]
pub struct CompletionSender {
    tx: Sender<Outcome>,
}

impl CompletionSender {
    /// Deliver the one outcome. Consumes the sender; the buffered slot makes
    /// this non-blocking regardless of reader state.
    pub fn deliver(self, outcome: Outcome) {
        if self.tx.try_send(outcome).is_err() {
            // Reader dropped its sink; the operation's result is unobserved.
            debug!("completion delivered to an abandoned sink");
        }
    }
}

/// Read half: returned to the issuing caller by `begin()`.
#[derive(Debug)]
pub struct CompletionSink {
    rx: Receiver<Outcome>,
}

impl CompletionSink {
    /// Block until the outcome arrives. Consumes the sink; the one delivered
    /// outcome is the one returned.
    pub fn wait(self) -> Result<Outcome, SinkError> {
        self.rx.recv().map_err(|_| SinkError::Disconnected)
    }

    /// Block for at most `timeout`. On timeout the wait is abandoned; the
    /// pending entry still completes through the normal path whenever the
    /// callback fires.
    pub fn wait_timeout(self, timeout: Duration) -> Result<Outcome, SinkError> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => SinkError::Timeout(timeout),
            RecvTimeoutError::Disconnected => SinkError::Disconnected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::CallbackPayload;

    #[test]
    fn delivery_before_wait_is_buffered() {
        let (tx, sink) = completion_channel();
        tx.deliver(Ok(CallbackPayload::Bool(true)));
        assert_eq!(sink.wait(), Ok(Ok(CallbackPayload::Bool(true))));
    }

    #[test]
    fn delivery_after_reader_gave_up_does_not_block() {
        let (tx, sink) = completion_channel();
        assert_eq!(
            sink.wait_timeout(Duration::from_millis(10)),
            Err(SinkError::Timeout(Duration::from_millis(10)))
        );
        // Sink consumed; this send lands in the buffered slot (or errors
        // harmlessly) without blocking the completion path.
        tx.deliver(Ok(CallbackPayload::None));
    }

    #[test]
    fn dropped_sender_is_observed_as_disconnect() {
        let (tx, sink) = completion_channel();
        drop(tx);
        assert_eq!(sink.wait(), Err(SinkError::Disconnected));
    }

    #[test]
    fn wait_unblocks_when_delivery_arrives_from_another_thread() {
        let (tx, sink) = completion_channel();
        let join = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            tx.deliver(Ok(CallbackPayload::Str("done".to_string())));
        });
        assert_eq!(
            sink.wait(),
            Ok(Ok(CallbackPayload::Str("done".to_string())))
        );
        join.join().unwrap();
    }
}
