#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Bridge Core Rust
//!
//! Bridging runtime for native libraries that complete operations
//! asynchronously via a callback on an arbitrary thread. Every exported
//! operation of a binding built on this crate packages arguments, invokes a
//! native entry point, and presents the eventual callback as an ordinary
//! blocking call returning a value-or-error.
//!
//! ## Architecture
//!
//! The core is a **correlation broker**: an opaque numeric handle generated
//! when an operation is issued is correlated with the delivery of exactly
//! one outcome to the thread that issued the call, whether the completion
//! arrives from the native callback thread or is synthesized locally
//! because the native call failed before any asynchronous work was
//! scheduled. A **serialization gate** with a bounded acquisition wait
//! throttles ledger request submission to one in-flight request per
//! process.
//!
//! ## Module Organization
//!
//! - [`broker`] - Handle allocation, pending-call registry, completion sinks
//! - [`callback`] - Extern "C" completion-callback shims
//! - [`gate`] - Bounded serialization gate
//! - [`submitter`] - Gated request submission
//! - [`codes`] - Native error-code taxonomy
//! - [`payload`] - Typed completion payloads and outcomes
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging bootstrap
//!
//! ## Quick Start
//!
//! ```rust
//! use bridge_core::broker::CorrelationBroker;
//! use bridge_core::codes::code;
//! use bridge_core::payload::CallbackPayload;
//! use std::sync::Arc;
//!
//! let broker = Arc::new(CorrelationBroker::new());
//! let completer = Arc::clone(&broker);
//!
//! // Dispatch "to the native library": here the callback thread is simulated.
//! let reply = broker.invoke(move |handle| {
//!     std::thread::spawn(move || {
//!         completer.complete(handle, Ok(CallbackPayload::Str("pong".to_string())));
//!     });
//!     code::SUCCESS
//! });
//!
//! assert_eq!(reply.unwrap().into_string().as_deref(), Some("pong"));
//! ```

pub mod broker;
pub mod callback;
pub mod codes;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod payload;
pub mod submitter;

pub use broker::{CommandHandle, CompletionSink, CorrelationBroker, SinkError};
pub use codes::{ErrorCode, ErrorKind};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use gate::{GateError, GateMetrics, SerializationGate};
pub use payload::{CallbackPayload, NativeError, Outcome};
pub use submitter::RequestSubmitter;
