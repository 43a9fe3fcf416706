// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator
// Licensed under the MIT License

use thiserror::Error;

/// Length of an encoded ed25519 group element in bytes.
pub const GE_LENGTH: usize = 32;
/// Length of an encoded group scalar in bytes.
pub const SCALAR_LENGTH: usize = 32;

/// Length of a serialized single-response Schnorr proof (challenge, response).
pub const SCHNORR_PROOF_LENGTH: usize = 2 * GE_LENGTH;
/// Length of a serialized double-base proof (challenge, two responses).
pub const DOUBLE_BASE_PROOF_LENGTH: usize = 3 * GE_LENGTH;

/// Length of the step 1 message: two generator halves with one proof each.
pub const STEP1_MESSAGE_LENGTH: usize = 6 * GE_LENGTH;
/// Length of the step 2 message: step 1 contents plus the commitment pair
/// and its double-base proof.
pub const STEP2_MESSAGE_LENGTH: usize = 11 * GE_LENGTH;
/// Length of the step 3 message: commitment pair with proof, blinded
/// difference with proof.
pub const STEP3_MESSAGE_LENGTH: usize = 8 * GE_LENGTH;
/// Length of the step 4 message: blinded difference with proof.
pub const STEP4_MESSAGE_LENGTH: usize = 3 * GE_LENGTH;
/// Length of the largest protocol message.
pub const MAX_MESSAGE_LENGTH: usize = STEP2_MESSAGE_LENGTH;

const _: () = assert!(GE_LENGTH == SCALAR_LENGTH);
const _: () = assert!(STEP1_MESSAGE_LENGTH == 192);
const _: () = assert!(STEP2_MESSAGE_LENGTH == 352);
const _: () = assert!(STEP3_MESSAGE_LENGTH == 256);
const _: () = assert!(STEP4_MESSAGE_LENGTH == 96);
const _: () = assert!(MAX_MESSAGE_LENGTH >= STEP1_MESSAGE_LENGTH);
const _: () = assert!(MAX_MESSAGE_LENGTH >= STEP3_MESSAGE_LENGTH);

/// Enumerates all error conditions that can arise during a comparison.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompareError {
    /// An input parameter is empty, missing, or the call was made in a
    /// protocol state that does not permit it.
    #[error("invalid input parameter")]
    InvalidParameter,
    /// The output buffer cannot hold the next protocol message. The call
    /// leaves the context untouched and may be retried with `needed` bytes.
    #[error("output buffer too small, {needed} bytes required")]
    BufferTooSmall {
        /// Exact output length the rejected call requires.
        needed: usize,
    },
    /// A peer message has an unexpected length, an undecodable group
    /// element, or a non-canonical scalar.
    #[error("peer message has invalid format or length")]
    MalformedMessage,
    /// A zero-knowledge proof failed to verify.
    #[error("zero-knowledge proof verification failed")]
    InvalidProof,
    /// The comparison has already failed; the context cannot be reused.
    #[error("comparison failed, context is terminal")]
    ProtocolFailed,
}

impl CompareError {
    /// Converts this error variant into a negative `i32` status code
    /// suitable for C FFI. Protocol-fatal variants share one code: callers
    /// across the FFI boundary only need to know the comparison is dead.
    pub fn to_c_int(self) -> i32 {
        match self {
            CompareError::InvalidParameter => -1,
            CompareError::BufferTooSmall { .. } => -2,
            CompareError::MalformedMessage
            | CompareError::InvalidProof
            | CompareError::ProtocolFailed => -3,
        }
    }
}

/// Convenience alias for `Result<T, CompareError>`.
pub type CompareResult<T> = Result<T, CompareError>;

/// Verdict of a comparison.
///
/// Stays [`NotReady`](MatchResult::NotReady) until the four-message exchange
/// has run to completion on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The protocol has not finished on this side.
    NotReady,
    /// Both parties hold the same secret.
    Match,
    /// The secrets differ.
    NoMatch,
}
