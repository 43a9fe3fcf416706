// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator
// Licensed under the MIT License

//! Core library for the Ecliptix zero-knowledge secure comparator.
//!
//! Implements the building blocks of the Socialist Millionaires' Protocol
//! (SMP) over the ed25519 group: two parties learn whether their secrets are
//! equal, and nothing else. The four-message exchange itself is driven by the
//! `compare-agent` crate; this crate supplies the primitives it is built from.
//!
//! # Crate layout
//!
//! * [`types`] -- shared constants, error types, and the comparison verdict.
//! * [`crypto`] -- the group-arithmetic boundary: scalar/point codecs,
//!   randomness, and hash-to-scalar reduction over curve25519-dalek.
//! * [`proof`] -- transcript-bound Schnorr proofs of discrete-log knowledge.
//! * [`secret`] -- incremental accumulation of secret material into a scalar.
//! * [`protocol`] -- wire-format serialization and parsing for the four
//!   protocol messages.

/// The group-arithmetic boundary over curve25519-dalek.
pub mod crypto;
/// Transcript-bound Schnorr proofs of discrete-log knowledge.
pub mod proof;
/// Wire-format serialization and parsing for protocol messages.
pub mod protocol;
/// Incremental accumulation of secret material into a scalar.
pub mod secret;
/// Shared constants, error types, and the comparison verdict.
pub mod types;
