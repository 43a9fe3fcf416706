// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator FFI Bindings
// Licensed under the MIT License

//! C-compatible FFI bindings for the zero-knowledge secure comparator.
//!
//! Exposes a flat, handle-based C API over the safe Rust implementation in
//! `compare-agent`, for consumption from C, C#, and Android (JNI) hosts.
//!
//! Lifecycle calls return [`COMPARE_SUCCESS`] or a negative error code.
//! Protocol calls additionally return [`COMPARE_SEND_OUTPUT_TO_PEER`] when
//! the written message must be delivered to the peer. Output buffers follow
//! an all-or-nothing contract: when `output` is NULL or `*output_length` is
//! insufficient, the call writes the exact required length to
//! `*output_length`, returns [`COMPARE_BUFFER_TOO_SMALL`], and leaves the
//! context untouched so it can be retried.

use std::ffi::c_void;

use compare_agent::{MatchResult, SecureComparator, StepOutcome};
use compare_core::types::{CompareError, CompareResult};

/// The operation completed; for `compare_proceed_compare` this means the
/// protocol finished and nothing more has to be sent.
pub const COMPARE_SUCCESS: i32 = 0;
/// The written output message must be delivered to the peer.
pub const COMPARE_SEND_OUTPUT_TO_PEER: i32 = 1;
/// Verdict: the secrets are equal.
pub const COMPARE_MATCH: i32 = 2;
/// Verdict: the secrets differ.
pub const COMPARE_NO_MATCH: i32 = 3;
/// Verdict unavailable: the protocol has not finished on this side.
pub const COMPARE_NOT_READY: i32 = 4;
/// NULL, empty, or wrong-state argument.
pub const COMPARE_INVALID_PARAMETER: i32 = -1;
/// Output buffer absent or undersized; required length written back.
pub const COMPARE_BUFFER_TOO_SMALL: i32 = -2;
/// Malformed peer message or proof verification failure; the context is
/// terminal.
pub const COMPARE_FAIL: i32 = -3;

struct ComparatorHandle {
    comparator: SecureComparator,
}

fn result_to_int(result: CompareResult<()>) -> i32 {
    match result {
        Ok(()) => COMPARE_SUCCESS,
        Err(error) => error.to_c_int(),
    }
}

/// Allocates a comparator and stores its handle in `*handle`.
///
/// # Safety
///
/// `handle` must be a valid pointer to writable handle storage.
#[no_mangle]
pub unsafe extern "C" fn compare_create(handle: *mut *mut c_void) -> i32 {
    if handle.is_null() {
        return COMPARE_INVALID_PARAMETER;
    }
    let boxed = Box::new(ComparatorHandle {
        comparator: SecureComparator::new(),
    });
    *handle = Box::into_raw(boxed) as *mut c_void;
    COMPARE_SUCCESS
}

/// Destroys a comparator, wiping all scalar material.
///
/// Valid at any protocol stage, including failed contexts.
///
/// # Safety
///
/// `handle` must be NULL or a handle obtained from [`compare_create`] that
/// has not been destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn compare_destroy(handle: *mut c_void) -> i32 {
    if handle.is_null() {
        return COMPARE_INVALID_PARAMETER;
    }
    drop(Box::from_raw(handle as *mut ComparatorHandle));
    COMPARE_SUCCESS
}

/// Appends secret material to a comparator that has not started comparing.
///
/// # Safety
///
/// `handle` must be a live handle from [`compare_create`]; `secret_data`
/// must point to `secret_data_length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn compare_append_secret(
    handle: *mut c_void,
    secret_data: *const u8,
    secret_data_length: usize,
) -> i32 {
    if handle.is_null() || secret_data.is_null() || secret_data_length == 0 {
        return COMPARE_INVALID_PARAMETER;
    }
    let comparator = &mut (*(handle as *mut ComparatorHandle)).comparator;
    let data = std::slice::from_raw_parts(secret_data, secret_data_length);
    result_to_int(comparator.append_secret(data))
}

/// Starts a comparison as the initiator, writing the first message.
///
/// On success returns [`COMPARE_SEND_OUTPUT_TO_PEER`] with the message
/// length in `*output_length`.
///
/// # Safety
///
/// `handle` must be a live handle; `output_length` must be a valid pointer;
/// `output` must be NULL or point to `*output_length` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn compare_begin_compare(
    handle: *mut c_void,
    output: *mut u8,
    output_length: *mut usize,
) -> i32 {
    if handle.is_null() || output_length.is_null() {
        return COMPARE_INVALID_PARAMETER;
    }
    let comparator = &mut (*(handle as *mut ComparatorHandle)).comparator;
    let out: &mut [u8] = if output.is_null() {
        &mut []
    } else {
        std::slice::from_raw_parts_mut(output, *output_length)
    };
    match comparator.begin_compare(out) {
        Ok(written) => {
            *output_length = written;
            COMPARE_SEND_OUTPUT_TO_PEER
        }
        Err(CompareError::BufferTooSmall { needed }) => {
            *output_length = needed;
            COMPARE_BUFFER_TOO_SMALL
        }
        Err(error) => error.to_c_int(),
    }
}

/// Consumes a peer message and advances the protocol.
///
/// Returns [`COMPARE_SEND_OUTPUT_TO_PEER`] with `*output_length > 0` while
/// messages remain, or [`COMPARE_SUCCESS`] with `*output_length == 0` once
/// the protocol completes on this side.
///
/// # Safety
///
/// `handle` must be a live handle; `peer_data` must point to
/// `peer_data_length` readable bytes; `output_length` must be a valid
/// pointer; `output` must be NULL or point to `*output_length` writable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn compare_proceed_compare(
    handle: *mut c_void,
    peer_data: *const u8,
    peer_data_length: usize,
    output: *mut u8,
    output_length: *mut usize,
) -> i32 {
    if handle.is_null()
        || peer_data.is_null()
        || peer_data_length == 0
        || output_length.is_null()
    {
        return COMPARE_INVALID_PARAMETER;
    }
    let comparator = &mut (*(handle as *mut ComparatorHandle)).comparator;
    let input = std::slice::from_raw_parts(peer_data, peer_data_length);
    let out: &mut [u8] = if output.is_null() {
        &mut []
    } else {
        std::slice::from_raw_parts_mut(output, *output_length)
    };
    match comparator.proceed_compare(input, out) {
        Ok(StepOutcome::SendToPeer(written)) => {
            *output_length = written;
            COMPARE_SEND_OUTPUT_TO_PEER
        }
        Ok(StepOutcome::Complete) => {
            *output_length = 0;
            COMPARE_SUCCESS
        }
        Err(CompareError::BufferTooSmall { needed }) => {
            *output_length = needed;
            COMPARE_BUFFER_TOO_SMALL
        }
        Err(error) => error.to_c_int(),
    }
}

/// Reads the comparison verdict.
///
/// # Safety
///
/// `handle` must be NULL or a live handle from [`compare_create`].
#[no_mangle]
pub unsafe extern "C" fn compare_get_result(handle: *const c_void) -> i32 {
    if handle.is_null() {
        return COMPARE_INVALID_PARAMETER;
    }
    let comparator = &(*(handle as *const ComparatorHandle)).comparator;
    match comparator.get_result() {
        MatchResult::Match => COMPARE_MATCH,
        MatchResult::NoMatch => COMPARE_NO_MATCH,
        MatchResult::NotReady => COMPARE_NOT_READY,
    }
}
