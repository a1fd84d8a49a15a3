//! Concurrency properties of the correlation broker: handle uniqueness,
//! single delivery, no lost wakeups, unknown-handle tolerance.

use bridge_core::broker::CorrelationBroker;
use bridge_core::codes::ErrorCode;
use bridge_core::payload::{CallbackPayload, NativeError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn concurrent_begins_yield_distinct_handles() {
    let broker = Arc::new(CorrelationBroker::new());

    let mut joins = Vec::new();
    for _ in 0..8 {
        let broker = Arc::clone(&broker);
        joins.push(thread::spawn(move || {
            let mut handles = Vec::with_capacity(250);
            for _ in 0..250 {
                let (handle, sink) = broker.begin();
                handles.push((handle, sink));
            }
            handles
        }));
    }

    let mut seen = HashSet::new();
    let mut sinks = Vec::new();
    for join in joins {
        for (handle, sink) in join.join().unwrap() {
            assert!(seen.insert(handle), "handle {handle} issued twice");
            sinks.push((handle, sink));
        }
    }
    assert_eq!(seen.len(), 2000);
    assert_eq!(broker.pending_count(), 2000);

    // Drain so nothing is left pending.
    for (handle, sink) in sinks {
        broker.complete(handle, Ok(CallbackPayload::Handle(handle)));
        assert_eq!(sink.wait(), Ok(Ok(CallbackPayload::Handle(handle))));
    }
    assert_eq!(broker.pending_count(), 0);
}

#[test]
fn racing_completions_deliver_exactly_once() {
    let broker = Arc::new(CorrelationBroker::new());

    for _ in 0..100 {
        let (handle, sink) = broker.begin();

        let first = {
            let broker = Arc::clone(&broker);
            thread::spawn(move || {
                broker.complete(handle, Ok(CallbackPayload::Str("first".to_string())));
            })
        };
        let second = {
            let broker = Arc::clone(&broker);
            thread::spawn(move || {
                broker.complete(
                    handle,
                    Err(NativeError::from_code(ErrorCode(112))),
                );
            })
        };

        // Exactly one of the racers wins the take; the reader observes that
        // outcome and only that outcome.
        let outcome = sink.wait().expect("one completion must arrive");
        match &outcome {
            Ok(payload) => assert_eq!(*payload, CallbackPayload::Str("first".to_string())),
            Err(native) => assert_eq!(native.code, ErrorCode(112)),
        }

        first.join().unwrap();
        second.join().unwrap();
        assert!(!broker.is_pending(handle));
    }
}

#[test]
fn every_waiting_caller_unblocks() {
    let broker = Arc::new(CorrelationBroker::new());
    let observed = Arc::new(Mutex::new(Vec::new()));

    let mut joins = Vec::new();
    for i in 0..100i64 {
        let broker = Arc::clone(&broker);
        let observed = Arc::clone(&observed);
        joins.push(thread::spawn(move || {
            let (handle, sink) = broker.begin();

            // Simulated native collaborator: completes on its own thread
            // after a spread of delays.
            let completer = Arc::clone(&broker);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis((i % 7) as u64 * 3));
                completer.complete(handle, Ok(CallbackPayload::Handle(handle)));
            });

            let outcome = sink.wait().expect("completion must arrive");
            assert_eq!(outcome, Ok(CallbackPayload::Handle(handle)));
            observed.lock().unwrap().push(handle);
        }));
    }
    for join in joins {
        join.join().unwrap();
    }

    assert_eq!(observed.lock().unwrap().len(), 100);
    assert_eq!(broker.pending_count(), 0);
}

#[test]
fn unknown_handle_completions_leave_pending_entries_untouched() {
    let broker = Arc::new(CorrelationBroker::new());
    let (handle, sink) = broker.begin();

    // Never-registered handle, then a double completion of a real one.
    broker.complete(handle + 100_000, Ok(CallbackPayload::None));
    broker.complete(handle, Ok(CallbackPayload::Bool(true)));
    broker.complete(handle, Ok(CallbackPayload::Bool(false)));

    assert_eq!(sink.wait(), Ok(Ok(CallbackPayload::Bool(true))));
    assert_eq!(broker.pending_count(), 0);
}
