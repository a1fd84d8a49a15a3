use crate::error::{BridgeError, Result};
use std::time::Duration;

/// Runtime tunables for the bridging layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Bound on waiting to acquire the submission serialization gate.
    pub gate_acquire_timeout_ms: u64,
    /// Optional cap on waiting for an outcome once a request is dispatched.
    /// `None` waits indefinitely, matching the native library's own
    /// request timeout handling.
    pub response_wait_cap_ms: Option<u64>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gate_acquire_timeout_ms: 60_000,
            response_wait_cap_ms: None,
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(timeout) = std::env::var("BRIDGE_GATE_ACQUIRE_TIMEOUT_MS") {
            config.gate_acquire_timeout_ms = timeout.parse().map_err(|e| {
                BridgeError::ConfigurationError(format!("Invalid gate_acquire_timeout_ms: {e}"))
            })?;
        }

        if let Ok(cap) = std::env::var("BRIDGE_RESPONSE_WAIT_CAP_MS") {
            config.response_wait_cap_ms = Some(cap.parse().map_err(|e| {
                BridgeError::ConfigurationError(format!("Invalid response_wait_cap_ms: {e}"))
            })?);
        }

        Ok(config)
    }

    pub fn gate_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.gate_acquire_timeout_ms)
    }

    pub fn response_wait_cap(&self) -> Option<Duration> {
        self.response_wait_cap_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_bounds() {
        let config = BridgeConfig::default();
        assert_eq!(config.gate_acquire_timeout(), Duration::from_secs(60));
        assert_eq!(config.response_wait_cap(), None);
    }

    #[test]
    fn invalid_env_value_is_a_configuration_error() {
        std::env::set_var("BRIDGE_GATE_ACQUIRE_TIMEOUT_MS", "not-a-number");
        let result = BridgeConfig::from_env();
        std::env::remove_var("BRIDGE_GATE_ACQUIRE_TIMEOUT_MS");
        assert!(matches!(result, Err(BridgeError::ConfigurationError(_))));
    }
}
