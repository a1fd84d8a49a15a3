//! # Native Completion-Callback Shims
//!
//! The extern "C" functions whose addresses are handed to native entry
//! points, one per recurring callback shape. Each shim decodes its raw
//! arguments into an owned [`CallbackPayload`] and drives
//! [`CorrelationBroker::complete`] against the process-global broker. The
//! callback thread belongs to the native library's internal pool, so the
//! shims do nothing blocking; locating the pending entry and pushing one
//! outcome is the whole job.

use crate::broker::{CommandHandle, CorrelationBroker};
use crate::codes::{code, ErrorCode};
use crate::payload::{CallbackPayload, NativeError, Outcome};
use std::ffi::{c_char, CStr};
use tracing::warn;

/// Decode an optional nul-terminated string. Null is a legal "absent".
///
/// # Safety
/// `ptr`, when non-null, must point to a nul-terminated buffer valid for the
/// duration of the call.
unsafe fn opt_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

/// Outcome for a callback whose values decoded successfully.
fn outcome(err: i32, payload: CallbackPayload) -> Outcome {
    let code = ErrorCode(err);
    if code.is_success() {
        Ok(payload)
    } else {
        Err(NativeError::from_code(code))
    }
}

/// A required value was missing or unreadable on a success callback; the
/// caller still gets exactly one classified failure rather than a bogus
/// empty success.
fn malformed(handle: CommandHandle, what: &str) -> Outcome {
    warn!(handle, what, "malformed completion callback arguments");
    Err(NativeError {
        code: code::COMMON_INVALID_STRUCTURE,
        message: format!("completion callback carried a null {what}"),
    })
}

/// Completion with no values beyond the status.
///
/// # Safety
/// Called from native code; `handle` must be a handle previously issued by
/// the global broker.
#[no_mangle]
pub unsafe extern "C" fn bridge_on_completion(handle: CommandHandle, err: i32) {
    CorrelationBroker::global().complete(handle, outcome(err, CallbackPayload::None));
}

/// Completion carrying one string.
///
/// # Safety
/// `value` must be null or a nul-terminated buffer valid for the call.
#[no_mangle]
pub unsafe extern "C" fn bridge_on_completion_str(
    handle: CommandHandle,
    err: i32,
    value: *const c_char,
) {
    let out = if err != 0 {
        outcome(err, CallbackPayload::None)
    } else {
        match opt_c_str(value) {
            Some(value) => Ok(CallbackPayload::Str(value)),
            None => malformed(handle, "string value"),
        }
    };
    CorrelationBroker::global().complete(handle, out);
}

/// Completion carrying two required strings.
///
/// # Safety
/// `first` and `second` must each be null or nul-terminated buffers valid
/// for the call.
#[no_mangle]
pub unsafe extern "C" fn bridge_on_completion_str_pair(
    handle: CommandHandle,
    err: i32,
    first: *const c_char,
    second: *const c_char,
) {
    let out = if err != 0 {
        outcome(err, CallbackPayload::None)
    } else {
        match (opt_c_str(first), opt_c_str(second)) {
            (Some(first), Some(second)) => Ok(CallbackPayload::StrPair(first, second)),
            _ => malformed(handle, "string pair"),
        }
    };
    CorrelationBroker::global().complete(handle, out);
}

/// Completion carrying a required string plus an optional second string.
///
/// # Safety
/// Pointer arguments must be null or nul-terminated buffers valid for the
/// call.
#[no_mangle]
pub unsafe extern "C" fn bridge_on_completion_str_opt_str(
    handle: CommandHandle,
    err: i32,
    first: *const c_char,
    second: *const c_char,
) {
    let out = if err != 0 {
        outcome(err, CallbackPayload::None)
    } else {
        match opt_c_str(first) {
            Some(first) => Ok(CallbackPayload::StrOptStr(first, opt_c_str(second))),
            None => malformed(handle, "string value"),
        }
    };
    CorrelationBroker::global().complete(handle, out);
}

/// Completion carrying a boolean.
///
/// # Safety
/// Called from native code with a handle issued by the global broker.
#[no_mangle]
pub unsafe extern "C" fn bridge_on_completion_bool(handle: CommandHandle, err: i32, value: u8) {
    CorrelationBroker::global().complete(handle, outcome(err, CallbackPayload::Bool(value != 0)));
}

/// Completion carrying a native resource handle.
///
/// # Safety
/// Called from native code with a handle issued by the global broker.
#[no_mangle]
pub unsafe extern "C" fn bridge_on_completion_handle(
    handle: CommandHandle,
    err: i32,
    value: i64,
) {
    CorrelationBroker::global().complete(handle, outcome(err, CallbackPayload::Handle(value)));
}

/// Completion carrying a byte buffer.
///
/// # Safety
/// `data` must be null or valid for reads of `len` bytes for the duration of
/// the call; the buffer is copied before the shim returns.
#[no_mangle]
pub unsafe extern "C" fn bridge_on_completion_bytes(
    handle: CommandHandle,
    err: i32,
    data: *const u8,
    len: u32,
) {
    let out = if err != 0 {
        outcome(err, CallbackPayload::None)
    } else if data.is_null() && len != 0 {
        malformed(handle, "byte buffer")
    } else {
        let bytes = if len == 0 {
            Vec::new()
        } else {
            std::slice::from_raw_parts(data, len as usize).to_vec()
        };
        Ok(CallbackPayload::Bytes(bytes))
    };
    CorrelationBroker::global().complete(handle, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    // The shims complete against the global broker, so each test issues its
    // handle there.

    #[test]
    fn str_shim_decodes_and_unblocks_the_reader() {
        let broker = CorrelationBroker::global();
        let (handle, sink) = broker.begin();
        let value = CString::new("{\"ok\":true}").unwrap();
        unsafe { bridge_on_completion_str(handle, 0, value.as_ptr()) };
        assert_eq!(
            sink.wait(),
            Ok(Ok(CallbackPayload::Str("{\"ok\":true}".to_string())))
        );
    }

    #[test]
    fn nonzero_status_overrides_values() {
        let broker = CorrelationBroker::global();
        let (handle, sink) = broker.begin();
        let value = CString::new("ignored").unwrap();
        unsafe { bridge_on_completion_str(handle, 304, value.as_ptr()) };
        match sink.wait() {
            Ok(Err(native)) => assert_eq!(native.code, ErrorCode(304)),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn null_required_string_resolves_to_structure_error() {
        let broker = CorrelationBroker::global();
        let (handle, sink) = broker.begin();
        unsafe { bridge_on_completion_str(handle, 0, std::ptr::null()) };
        match sink.wait() {
            Ok(Err(native)) => assert_eq!(native.code, code::COMMON_INVALID_STRUCTURE),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn opt_str_shim_tolerates_null_second_value() {
        let broker = CorrelationBroker::global();
        let (handle, sink) = broker.begin();
        let first = CString::new("did:example:123").unwrap();
        unsafe {
            bridge_on_completion_str_opt_str(handle, 0, first.as_ptr(), std::ptr::null())
        };
        assert_eq!(
            sink.wait(),
            Ok(Ok(CallbackPayload::StrOptStr(
                "did:example:123".to_string(),
                None
            )))
        );
    }

    #[test]
    fn bytes_shim_copies_the_buffer() {
        let broker = CorrelationBroker::global();
        let (handle, sink) = broker.begin();
        let data = [1u8, 2, 3, 4];
        unsafe { bridge_on_completion_bytes(handle, 0, data.as_ptr(), data.len() as u32) };
        assert_eq!(sink.wait(), Ok(Ok(CallbackPayload::Bytes(vec![1, 2, 3, 4]))));
    }

    #[test]
    fn stray_callback_for_unknown_handle_is_ignored() {
        unsafe { bridge_on_completion(i64::MAX - 5, 0) };
    }
}
