//! # Completion Payloads and Outcomes
//!
//! Typed representation of what a completion callback delivers. Each native
//! operation family resolves to one fixed field layout; modeling the layouts
//! as a sum type keeps the broker opaque to the payload while letting each
//! wrapper decode its known shape without downcasts.

use crate::codes::ErrorCode;
use std::fmt;

/// The success side of an outcome: the ordered, typed values a completion
/// callback carried, one variant per recurring callback shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackPayload {
    /// Callback carried no values beyond the status.
    None,
    /// Single string value (JSON documents, identifiers, receipts).
    Str(String),
    /// Two string values (e.g. identifier + verification key).
    StrPair(String, String),
    /// Required string plus an optional second string.
    StrOptStr(String, Option<String>),
    /// Single boolean (verification results).
    Bool(bool),
    /// Native resource handle.
    Handle(i64),
    /// Raw byte buffer (signatures, encrypted messages).
    Bytes(Vec<u8>),
}

impl CallbackPayload {
    pub fn into_string(self) -> Option<String> {
        match self {
            CallbackPayload::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_string_pair(self) -> Option<(String, String)> {
        match self {
            CallbackPayload::StrPair(first, second) => Some((first, second)),
            _ => None,
        }
    }

    /// Parse a string payload as a JSON document. Most string payloads from
    /// the native library are JSON (requests, replies, credential objects).
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            CallbackPayload::Str(value) => serde_json::from_str(&value).ok(),
            _ => None,
        }
    }

    pub fn into_bool(self) -> Option<bool> {
        match self {
            CallbackPayload::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_handle(self) -> Option<i64> {
        match self {
            CallbackPayload::Handle(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            CallbackPayload::Bytes(value) => Some(value),
            _ => None,
        }
    }
}

/// Failure side of an outcome: the classified native error.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeError {
    pub code: ErrorCode,
    pub message: String,
}

impl NativeError {
    /// Build a failure from a bare code using the taxonomy table.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
        }
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code.0, self.message)
    }
}

impl std::error::Error for NativeError {}

/// The single result delivered for a correlation handle.
pub type Outcome = std::result::Result<CallbackPayload, NativeError>;
