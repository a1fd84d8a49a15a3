//! # Native Error-Code Taxonomy
//!
//! Process-wide, read-only lookup from the native library's numeric error
//! codes to human-readable descriptions and a coarse kind classification.
//! The broker applies this table only when constructing failure outcomes;
//! it never drives control flow off a specific code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric status returned synchronously by native entry points and carried
/// by every completion callback. Zero means success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub i32);

/// Well-known codes, grouped by the native library's published ranges.
pub mod code {
    use super::ErrorCode;

    pub const SUCCESS: ErrorCode = ErrorCode(0);

    // 100s: common argument / state errors
    pub const COMMON_INVALID_PARAM_FIRST: ErrorCode = ErrorCode(100);
    pub const COMMON_INVALID_PARAM_LAST: ErrorCode = ErrorCode(111);
    pub const COMMON_INVALID_STATE: ErrorCode = ErrorCode(112);
    pub const COMMON_INVALID_STRUCTURE: ErrorCode = ErrorCode(113);
    pub const COMMON_IO_ERROR: ErrorCode = ErrorCode(114);

    // 200s: wallet storage
    pub const WALLET_INVALID_HANDLE: ErrorCode = ErrorCode(200);
    pub const WALLET_ALREADY_EXISTS: ErrorCode = ErrorCode(203);
    pub const WALLET_NOT_FOUND: ErrorCode = ErrorCode(204);
    pub const WALLET_ALREADY_OPENED: ErrorCode = ErrorCode(206);
    pub const WALLET_ACCESS_FAILED: ErrorCode = ErrorCode(207);
    pub const WALLET_STORAGE_ERROR: ErrorCode = ErrorCode(210);
    pub const WALLET_ITEM_NOT_FOUND: ErrorCode = ErrorCode(212);
    pub const WALLET_ITEM_ALREADY_EXISTS: ErrorCode = ErrorCode(213);

    // 300s: ledger / consensus pool
    pub const POOL_NOT_CREATED: ErrorCode = ErrorCode(300);
    pub const POOL_INVALID_HANDLE: ErrorCode = ErrorCode(301);
    pub const POOL_TERMINATED: ErrorCode = ErrorCode(302);
    pub const LEDGER_NO_CONSENSUS: ErrorCode = ErrorCode(303);
    pub const LEDGER_INVALID_TRANSACTION: ErrorCode = ErrorCode(304);
    pub const LEDGER_SECURITY_ERROR: ErrorCode = ErrorCode(305);
    pub const POOL_CONFIG_ALREADY_EXISTS: ErrorCode = ErrorCode(306);
    pub const POOL_TIMEOUT: ErrorCode = ErrorCode(307);
    pub const POOL_INCOMPATIBLE_PROTOCOL_VERSION: ErrorCode = ErrorCode(308);
    pub const LEDGER_ITEM_NOT_FOUND: ErrorCode = ErrorCode(309);

    // 400s: credential issuance / proof
    pub const CREDENTIAL_REVOCATION_REGISTRY_FULL: ErrorCode = ErrorCode(400);
    pub const CREDENTIAL_INVALID_USER_REVOC_ID: ErrorCode = ErrorCode(401);
    pub const CREDENTIAL_MASTER_SECRET_DUPLICATE: ErrorCode = ErrorCode(404);
    pub const CREDENTIAL_PROOF_REJECTED: ErrorCode = ErrorCode(405);
    pub const CREDENTIAL_REVOKED: ErrorCode = ErrorCode(406);
    pub const CREDENTIAL_DEF_ALREADY_EXISTS: ErrorCode = ErrorCode(407);

    // 500s: crypto
    pub const CRYPTO_UNKNOWN_TYPE: ErrorCode = ErrorCode(500);

    // 600s: identifiers
    pub const DID_ALREADY_EXISTS: ErrorCode = ErrorCode(600);

    // 700s: payment
    pub const PAYMENT_UNKNOWN_METHOD: ErrorCode = ErrorCode(700);
    pub const PAYMENT_INCOMPATIBLE_METHODS: ErrorCode = ErrorCode(701);
    pub const PAYMENT_INSUFFICIENT_FUNDS: ErrorCode = ErrorCode(702);
    pub const PAYMENT_SOURCE_DOES_NOT_EXIST: ErrorCode = ErrorCode(703);
    pub const PAYMENT_OPERATION_NOT_SUPPORTED: ErrorCode = ErrorCode(704);
    pub const PAYMENT_EXTRA_FUNDS: ErrorCode = ErrorCode(705);
}

/// Coarse classification of a native code, by published range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Success,
    InvalidInput,
    InvalidState,
    InvalidStructure,
    Io,
    Wallet,
    Ledger,
    Credential,
    Crypto,
    Did,
    Payment,
    Unknown,
}

impl ErrorKind {
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::Success => "success",
            ErrorKind::InvalidInput => "invalid input parameter",
            ErrorKind::InvalidState => "invalid library state",
            ErrorKind::InvalidStructure => "invalid structure",
            ErrorKind::Io => "io error",
            ErrorKind::Wallet => "wallet error",
            ErrorKind::Ledger => "ledger error",
            ErrorKind::Credential => "credential error",
            ErrorKind::Crypto => "crypto error",
            ErrorKind::Did => "identifier error",
            ErrorKind::Payment => "payment error",
            ErrorKind::Unknown => "unknown error",
        }
    }
}

impl ErrorCode {
    pub fn is_success(self) -> bool {
        self == code::SUCCESS
    }

    pub fn kind(self) -> ErrorKind {
        match self.0 {
            0 => ErrorKind::Success,
            100..=111 => ErrorKind::InvalidInput,
            112 => ErrorKind::InvalidState,
            113 => ErrorKind::InvalidStructure,
            114 => ErrorKind::Io,
            200..=299 => ErrorKind::Wallet,
            300..=399 => ErrorKind::Ledger,
            400..=499 => ErrorKind::Credential,
            500..=599 => ErrorKind::Crypto,
            600..=699 => ErrorKind::Did,
            700..=799 => ErrorKind::Payment,
            _ => ErrorKind::Unknown,
        }
    }

    /// Static description of a known code, falling back to the kind's
    /// description for codes inside a published range but not in the table.
    pub fn message(self) -> &'static str {
        match self {
            code::SUCCESS => "success",
            code::COMMON_INVALID_STATE => "library is in an invalid state for the operation",
            code::COMMON_INVALID_STRUCTURE => "object structure is invalid",
            code::COMMON_IO_ERROR => "io error",
            code::WALLET_INVALID_HANDLE => "wallet handle is invalid",
            code::WALLET_ALREADY_EXISTS => "wallet with this name already exists",
            code::WALLET_NOT_FOUND => "wallet not found",
            code::WALLET_ALREADY_OPENED => "wallet is already opened",
            code::WALLET_ACCESS_FAILED => "wallet access failed",
            code::WALLET_STORAGE_ERROR => "wallet storage error",
            code::WALLET_ITEM_NOT_FOUND => "wallet item not found",
            code::WALLET_ITEM_ALREADY_EXISTS => "wallet item already exists",
            code::POOL_NOT_CREATED => "pool ledger configuration does not exist",
            code::POOL_INVALID_HANDLE => "pool handle is invalid",
            code::POOL_TERMINATED => "pool connection terminated",
            code::LEDGER_NO_CONSENSUS => "no consensus reached during ledger operation",
            code::LEDGER_INVALID_TRANSACTION => "transaction rejected by the ledger",
            code::LEDGER_SECURITY_ERROR => "request rejected for insufficient permissions",
            code::POOL_CONFIG_ALREADY_EXISTS => "pool ledger configuration already exists",
            code::POOL_TIMEOUT => "pool operation timed out",
            code::POOL_INCOMPATIBLE_PROTOCOL_VERSION => {
                "pool protocol version is incompatible with the client"
            }
            code::LEDGER_ITEM_NOT_FOUND => "requested item is not present on the ledger",
            code::CREDENTIAL_REVOCATION_REGISTRY_FULL => "revocation registry is full",
            code::CREDENTIAL_INVALID_USER_REVOC_ID => "invalid user revocation id",
            code::CREDENTIAL_MASTER_SECRET_DUPLICATE => "master secret name already exists",
            code::CREDENTIAL_PROOF_REJECTED => "proof rejected",
            code::CREDENTIAL_REVOKED => "credential has been revoked",
            code::CREDENTIAL_DEF_ALREADY_EXISTS => "credential definition already exists",
            code::CRYPTO_UNKNOWN_TYPE => "unknown crypto type",
            code::DID_ALREADY_EXISTS => "identifier already exists",
            code::PAYMENT_UNKNOWN_METHOD => "unknown payment method",
            code::PAYMENT_INCOMPATIBLE_METHODS => "incompatible payment methods",
            code::PAYMENT_INSUFFICIENT_FUNDS => "insufficient funds on inputs",
            code::PAYMENT_SOURCE_DOES_NOT_EXIST => "payment source does not exist",
            code::PAYMENT_OPERATION_NOT_SUPPORTED => "payment operation not supported",
            code::PAYMENT_EXTRA_FUNDS => "extra funds on inputs",
            _ => {
                if (100..=111).contains(&self.0) {
                    "invalid parameter passed to native entry point"
                } else {
                    self.kind().description()
                }
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.message())
    }
}

impl From<i32> for ErrorCode {
    fn from(raw: i32) -> Self {
        ErrorCode(raw)
    }
}
