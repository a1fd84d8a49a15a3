//! # Structured Logging Module
//!
//! Environment-aware structured logging for debugging callback correlation
//! across native and caller threads.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(EnvFilter::new(log_level)),
        );

        // A host application (or a language binding embedding this crate)
        // may already have installed a global subscriber.
        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }

        tracing::info!(
            environment = %environment,
            "🌉 STRUCTURED LOGGING: initialized"
        );
    });
}

fn get_environment() -> String {
    std::env::var("BRIDGE_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for broker operations.
pub fn log_bridge_operation(
    operation: &str,
    handle: Option<i64>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        handle = handle,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🌉 BRIDGE_OPERATION"
    );
}

/// Log structured data for gate acquisitions.
pub fn log_gate_operation(
    operation: &str,
    status: &str,
    waited_ms: Option<u64>,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        status = %status,
        waited_ms = waited_ms,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🚦 GATE_OPERATION"
    );
}
