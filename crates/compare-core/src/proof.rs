// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator
// Licensed under the MIT License

//! Transcript-bound Schnorr proofs.
//!
//! Three proof shapes are used by the comparison protocol, all built on the
//! same pattern: commit with fresh random nonces, derive the challenge by
//! hashing the commitments together with a one-byte protocol position, and
//! respond with `c * secret + nonce`. Hashing the position into the
//! challenge pins every proof to a single message slot, so a proof captured
//! in one position never verifies in another.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::crypto;
use crate::types::{
    CompareError, CompareResult, DOUBLE_BASE_PROOF_LENGTH, SCALAR_LENGTH, SCHNORR_PROOF_LENGTH,
};

/// Proof of knowledge of one discrete logarithm (challenge, response).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchnorrProof {
    pub challenge: Scalar,
    pub response: Scalar,
}

/// Proof of knowledge of the two exponents behind a commitment pair
/// (challenge, one response per exponent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBaseProof {
    pub challenge: Scalar,
    pub response1: Scalar,
    pub response2: Scalar,
}

fn challenge(position: u8, commitments: &[&EdwardsPoint]) -> Scalar {
    let mut hasher = Sha512::new();
    for commitment in commitments {
        hasher.update(crypto::encode_point(commitment));
    }
    hasher.update([position]);
    crypto::scalar_from_hash(hasher)
}

/// Proves knowledge of `scalar` such that `point = scalar * G`.
pub fn prove_dlog<R: RngCore + CryptoRng>(
    rng: &mut R,
    position: u8,
    scalar: &Scalar,
) -> SchnorrProof {
    let mut nonce = crypto::random_scalar(rng);
    let commitment = EdwardsPoint::mul_base(&nonce);
    let challenge = challenge(position, &[&commitment]);
    let response = challenge * scalar + nonce;
    nonce.zeroize();
    SchnorrProof {
        challenge,
        response,
    }
}

/// Verifies a [`prove_dlog`] proof for `point` at `position`.
///
/// Recomputes the commitment as `response * G - challenge * point` and
/// checks that it reproduces the challenge.
///
/// # Errors
///
/// Returns [`CompareError::InvalidProof`] if the proof does not verify.
pub fn verify_dlog(
    position: u8,
    point: &EdwardsPoint,
    proof: &SchnorrProof,
) -> CompareResult<()> {
    let commitment = EdwardsPoint::vartime_double_scalar_mul_basepoint(
        &-proof.challenge,
        point,
        &proof.response,
    );
    if challenge(position, &[&commitment]) == proof.challenge {
        Ok(())
    } else {
        Err(CompareError::InvalidProof)
    }
}

/// Proves knowledge of `(scalar1, scalar2)` such that
/// `commitment_p = scalar1 * base2` and
/// `commitment_q = scalar2 * base1 + scalar1 * G`.
pub fn prove_double_base<R: RngCore + CryptoRng>(
    rng: &mut R,
    position: u8,
    scalar1: &Scalar,
    scalar2: &Scalar,
    base1: &EdwardsPoint,
    base2: &EdwardsPoint,
) -> DoubleBaseProof {
    let mut nonce1 = crypto::random_scalar(rng);
    let mut nonce2 = crypto::random_scalar(rng);
    let commitment1 = base2 * nonce1;
    let commitment2 = base1 * nonce2 + EdwardsPoint::mul_base(&nonce1);
    let challenge = challenge(position, &[&commitment1, &commitment2]);
    let response1 = challenge * scalar1 + nonce1;
    let response2 = challenge * scalar2 + nonce2;
    nonce1.zeroize();
    nonce2.zeroize();
    DoubleBaseProof {
        challenge,
        response1,
        response2,
    }
}

/// Verifies a [`prove_double_base`] proof for the pair
/// `(commitment_p, commitment_q)` over `(base1, base2)` at `position`.
///
/// # Errors
///
/// Returns [`CompareError::InvalidProof`] if the proof does not verify.
pub fn verify_double_base(
    position: u8,
    base1: &EdwardsPoint,
    base2: &EdwardsPoint,
    commitment_p: &EdwardsPoint,
    commitment_q: &EdwardsPoint,
    proof: &DoubleBaseProof,
) -> CompareResult<()> {
    let commitment1 = base2 * proof.response1 - commitment_p * proof.challenge;
    let commitment2 = EdwardsPoint::vartime_double_scalar_mul_basepoint(
        &proof.response2,
        base1,
        &proof.response1,
    ) - commitment_q * proof.challenge;
    if challenge(position, &[&commitment1, &commitment2]) == proof.challenge {
        Ok(())
    } else {
        Err(CompareError::InvalidProof)
    }
}

/// Proves that one scalar links two images: `scalar * G` (published
/// earlier as a generator half) and `image = scalar * point`.
pub fn prove_dlog_eq<R: RngCore + CryptoRng>(
    rng: &mut R,
    position: u8,
    scalar: &Scalar,
    point: &EdwardsPoint,
) -> SchnorrProof {
    let mut nonce = crypto::random_scalar(rng);
    let commitment1 = EdwardsPoint::mul_base(&nonce);
    let commitment2 = point * nonce;
    let challenge = challenge(position, &[&commitment1, &commitment2]);
    let response = challenge * scalar + nonce;
    nonce.zeroize();
    SchnorrProof {
        challenge,
        response,
    }
}

/// Verifies a [`prove_dlog_eq`] proof at `position`: the exponent behind
/// `base_half` also maps `point` to `image`.
///
/// # Errors
///
/// Returns [`CompareError::InvalidProof`] if the proof does not verify.
pub fn verify_dlog_eq(
    position: u8,
    base_half: &EdwardsPoint,
    point: &EdwardsPoint,
    image: &EdwardsPoint,
    proof: &SchnorrProof,
) -> CompareResult<()> {
    let commitment1 = EdwardsPoint::vartime_double_scalar_mul_basepoint(
        &-proof.challenge,
        base_half,
        &proof.response,
    );
    let commitment2 = point * proof.response - image * proof.challenge;
    if challenge(position, &[&commitment1, &commitment2]) == proof.challenge {
        Ok(())
    } else {
        Err(CompareError::InvalidProof)
    }
}

impl SchnorrProof {
    /// Serializes the proof as `challenge || response`.
    pub fn to_bytes(&self) -> [u8; SCHNORR_PROOF_LENGTH] {
        let mut bytes = [0u8; SCHNORR_PROOF_LENGTH];
        bytes[..SCALAR_LENGTH].copy_from_slice(&crypto::encode_scalar(&self.challenge));
        bytes[SCALAR_LENGTH..].copy_from_slice(&crypto::encode_scalar(&self.response));
        bytes
    }

    /// Deserializes a proof from exactly [`SCHNORR_PROOF_LENGTH`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::MalformedMessage`] on wrong length or a
    /// non-canonical scalar encoding.
    pub fn from_bytes(bytes: &[u8]) -> CompareResult<Self> {
        if bytes.len() != SCHNORR_PROOF_LENGTH {
            return Err(CompareError::MalformedMessage);
        }
        Ok(Self {
            challenge: crypto::decode_scalar(&bytes[..SCALAR_LENGTH])?,
            response: crypto::decode_scalar(&bytes[SCALAR_LENGTH..])?,
        })
    }
}

impl DoubleBaseProof {
    /// Serializes the proof as `challenge || response1 || response2`.
    pub fn to_bytes(&self) -> [u8; DOUBLE_BASE_PROOF_LENGTH] {
        let mut bytes = [0u8; DOUBLE_BASE_PROOF_LENGTH];
        bytes[..SCALAR_LENGTH].copy_from_slice(&crypto::encode_scalar(&self.challenge));
        bytes[SCALAR_LENGTH..2 * SCALAR_LENGTH]
            .copy_from_slice(&crypto::encode_scalar(&self.response1));
        bytes[2 * SCALAR_LENGTH..].copy_from_slice(&crypto::encode_scalar(&self.response2));
        bytes
    }

    /// Deserializes a proof from exactly [`DOUBLE_BASE_PROOF_LENGTH`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::MalformedMessage`] on wrong length or a
    /// non-canonical scalar encoding.
    pub fn from_bytes(bytes: &[u8]) -> CompareResult<Self> {
        if bytes.len() != DOUBLE_BASE_PROOF_LENGTH {
            return Err(CompareError::MalformedMessage);
        }
        Ok(Self {
            challenge: crypto::decode_scalar(&bytes[..SCALAR_LENGTH])?,
            response1: crypto::decode_scalar(&bytes[SCALAR_LENGTH..2 * SCALAR_LENGTH])?,
            response2: crypto::decode_scalar(&bytes[2 * SCALAR_LENGTH..])?,
        })
    }
}
