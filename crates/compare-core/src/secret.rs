// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator
// Licensed under the MIT License

use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};

use crate::crypto;
use crate::types::{CompareError, CompareResult};

/// Accumulates secret material of arbitrary length into a single scalar.
///
/// Secret bytes are absorbed into a running SHA-512 state as they arrive and
/// are never stored. On first protocol use the digest is reduced modulo the
/// group order, yielding the scalar whose equality the protocol tests.
/// Splitting the same byte sequence across any number of
/// [`absorb`](SecretAccumulator::absorb) calls produces the same scalar.
pub struct SecretAccumulator {
    hasher: Option<Sha512>,
}

impl SecretAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            hasher: Some(Sha512::new()),
        }
    }

    /// Absorbs a chunk of secret material.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidParameter`] if `data` is empty or the
    /// accumulator has already been finalized.
    pub fn absorb(&mut self, data: &[u8]) -> CompareResult<()> {
        if data.is_empty() {
            return Err(CompareError::InvalidParameter);
        }
        match self.hasher.as_mut() {
            Some(hasher) => {
                hasher.update(data);
                Ok(())
            }
            None => Err(CompareError::InvalidParameter),
        }
    }

    /// Finalizes the accumulator into the compared scalar.
    ///
    /// Consumes the hash state; the accumulator rejects all further calls.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidParameter`] if already finalized.
    pub fn finalize(&mut self) -> CompareResult<Scalar> {
        let hasher = self.hasher.take().ok_or(CompareError::InvalidParameter)?;
        Ok(crypto::scalar_from_hash(hasher))
    }

    /// Returns `true` once [`finalize`](SecretAccumulator::finalize) has run.
    pub fn is_finalized(&self) -> bool {
        self.hasher.is_none()
    }
}

impl Default for SecretAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
