use crate::payload::NativeError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// The native operation was dispatched (or failed to dispatch) and
    /// resolved to a classified native error.
    Native(NativeError),
    /// The completion channel was torn down before an outcome arrived.
    CompletionLost(String),
    /// No outcome arrived within the configured response wait cap.
    ResponseTimeout(String),
    /// The serialization gate could not be acquired within its timeout.
    GateTimeout(String),
    ConfigurationError(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Native(err) => write!(f, "Native error: {err}"),
            BridgeError::CompletionLost(msg) => write!(f, "Completion lost: {msg}"),
            BridgeError::ResponseTimeout(msg) => write!(f, "Response timeout: {msg}"),
            BridgeError::GateTimeout(msg) => write!(f, "Gate timeout: {msg}"),
            BridgeError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<NativeError> for BridgeError {
    fn from(err: NativeError) -> Self {
        BridgeError::Native(err)
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
