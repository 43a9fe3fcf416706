// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator
// Licensed under the MIT License

//! The group-arithmetic boundary.
//!
//! Every conversion between untrusted bytes and typed curve values lives
//! here, together with scalar randomness and hash-to-scalar reduction.
//! The rest of the crate works with `curve25519-dalek` values and never
//! touches raw encodings.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::types::{CompareError, CompareResult, GE_LENGTH, SCALAR_LENGTH};

/// Draws a uniformly distributed scalar from `rng`.
///
/// Fills a 64-byte buffer and reduces it modulo the group order, so the
/// output is unbiased. The intermediate bytes are wiped before returning.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    let mut wide = [0u8; 64];
    rng.fill_bytes(&mut wide);
    let scalar = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    scalar
}

/// Reduces a finished SHA-512 state to a scalar modulo the group order.
pub fn scalar_from_hash(hasher: Sha512) -> Scalar {
    let mut wide: [u8; 64] = hasher.finalize().into();
    let scalar = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    scalar
}

/// Hashes the concatenation of all `parts` to a scalar.
///
/// Uses the streaming SHA-512 API, so the digest depends only on the
/// concatenated byte sequence, not on how it is split across `parts`.
pub fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    scalar_from_hash(hasher)
}

/// Decodes a compressed group element from exactly [`GE_LENGTH`] bytes.
///
/// # Errors
///
/// Returns [`CompareError::MalformedMessage`] if `bytes` has the wrong
/// length or is not a decodable point encoding. The identity element is a
/// valid encoding: the protocol must be able to represent it to judge
/// degenerate peer contributions.
pub fn decode_point(bytes: &[u8]) -> CompareResult<EdwardsPoint> {
    let compressed =
        CompressedEdwardsY::from_slice(bytes).map_err(|_| CompareError::MalformedMessage)?;
    compressed
        .decompress()
        .ok_or(CompareError::MalformedMessage)
}

/// Serializes a group element into its compressed [`GE_LENGTH`]-byte form.
pub fn encode_point(point: &EdwardsPoint) -> [u8; GE_LENGTH] {
    point.compress().to_bytes()
}

/// Decodes a scalar from exactly [`SCALAR_LENGTH`] bytes.
///
/// # Errors
///
/// Returns [`CompareError::MalformedMessage`] if `bytes` has the wrong
/// length or is not the canonical encoding of a reduced scalar.
pub fn decode_scalar(bytes: &[u8]) -> CompareResult<Scalar> {
    let array: [u8; SCALAR_LENGTH] = bytes
        .try_into()
        .map_err(|_| CompareError::MalformedMessage)?;
    Option::<Scalar>::from(Scalar::from_canonical_bytes(array))
        .ok_or(CompareError::MalformedMessage)
}

/// Serializes a scalar into its canonical [`SCALAR_LENGTH`]-byte form.
pub fn encode_scalar(scalar: &Scalar) -> [u8; SCALAR_LENGTH] {
    scalar.to_bytes()
}
