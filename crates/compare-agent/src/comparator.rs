// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator
// Licensed under the MIT License

use compare_core::protocol::{
    self, Step1Message, Step2Message, Step3Message, Step4Message,
};
use compare_core::secret::SecretAccumulator;
use compare_core::types::{
    CompareError, CompareResult, MatchResult, STEP1_MESSAGE_LENGTH, STEP2_MESSAGE_LENGTH,
    STEP3_MESSAGE_LENGTH, STEP4_MESSAGE_LENGTH,
};
use compare_core::{crypto, proof};
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::{Identity, IsIdentity};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

// Proof positions, one per message slot. A proof generated for one slot
// never verifies in another.
const POS_G2_INITIATOR: u8 = 1;
const POS_G3_INITIATOR: u8 = 2;
const POS_G2_RESPONDER: u8 = 3;
const POS_G3_RESPONDER: u8 = 4;
const POS_COMMITMENT_RESPONDER: u8 = 5;
const POS_COMMITMENT_INITIATOR: u8 = 6;
const POS_DIFF_INITIATOR: u8 = 7;
const POS_DIFF_RESPONDER: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Accepting secret material. A `begin_compare` call takes the
    /// initiator role; a first `proceed_compare` call takes the responder
    /// role.
    Idle,
    /// Initiator sent step 1, expects step 2.
    AwaitingStep2,
    /// Responder sent step 2, expects step 3.
    AwaitingStep3,
    /// Initiator sent step 3, expects step 4.
    AwaitingStep4,
    /// Protocol finished; the verdict is readable.
    Done,
    /// A validation error occurred. Terminal and sticky.
    Failed,
}

/// Outcome of a successful [`SecureComparator::proceed_compare`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// `n` bytes were written to the output buffer and must be delivered
    /// to the peer.
    SendToPeer(usize),
    /// The protocol is complete on this side; nothing to send.
    Complete,
}

/// A single two-party equality comparison.
///
/// Each context is single-use: create, append secret material, drive the
/// protocol to completion, read the verdict, drop. The two peers are fully
/// independent; the only thing they share is the messages the caller
/// ferries between them.
///
/// The context is not `Clone` and performs no internal locking; concurrent
/// use from multiple threads requires external synchronization. All scalar
/// material is wiped on drop, whatever state the protocol stopped in.
pub struct SecureComparator<R = OsRng> {
    rng: R,
    state: State,
    secret_input: SecretAccumulator,
    secret: Scalar,
    rand: Scalar,
    rand2: Scalar,
    rand3: Scalar,
    g2: EdwardsPoint,
    g3: EdwardsPoint,
    peer_g3_half: EdwardsPoint,
    commitment_p: EdwardsPoint,
    commitment_q: EdwardsPoint,
    peer_commitment_p: EdwardsPoint,
    commitment_diff: EdwardsPoint,
    result: MatchResult,
}

impl SecureComparator<OsRng> {
    /// Creates a comparator drawing randomness from the operating system.
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for SecureComparator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> SecureComparator<R> {
    /// Creates a comparator drawing randomness from the supplied generator.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            state: State::Idle,
            secret_input: SecretAccumulator::new(),
            secret: Scalar::ZERO,
            rand: Scalar::ZERO,
            rand2: Scalar::ZERO,
            rand3: Scalar::ZERO,
            g2: EdwardsPoint::identity(),
            g3: EdwardsPoint::identity(),
            peer_g3_half: EdwardsPoint::identity(),
            commitment_p: EdwardsPoint::identity(),
            commitment_q: EdwardsPoint::identity(),
            peer_commitment_p: EdwardsPoint::identity(),
            commitment_diff: EdwardsPoint::identity(),
            result: MatchResult::NotReady,
        }
    }

    /// Appends a chunk of the secret being compared.
    ///
    /// May be called any number of times before the protocol starts;
    /// chunking does not affect the comparison.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidParameter`] if `secret_data` is empty
    /// or the protocol has already started.
    pub fn append_secret(&mut self, secret_data: &[u8]) -> CompareResult<()> {
        if secret_data.is_empty() {
            return Err(CompareError::InvalidParameter);
        }
        if self.state != State::Idle {
            return Err(CompareError::InvalidParameter);
        }
        self.secret_input.absorb(secret_data)
    }

    /// Starts the comparison as the initiator and writes the step 1 message.
    ///
    /// Returns the number of bytes written. After this call the context
    /// expects the peer's reply via
    /// [`proceed_compare`](SecureComparator::proceed_compare); no further
    /// secret material can be appended.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::BufferTooSmall`] with the required length if
    /// `output` cannot hold the message; the context is unchanged and the
    /// call may be retried. Returns [`CompareError::InvalidParameter`] if
    /// the protocol has already started, or
    /// [`CompareError::ProtocolFailed`] on a failed context.
    pub fn begin_compare(&mut self, output: &mut [u8]) -> CompareResult<usize> {
        match self.state {
            State::Idle => {}
            State::Failed => return Err(CompareError::ProtocolFailed),
            _ => return Err(CompareError::InvalidParameter),
        }
        if output.len() < STEP1_MESSAGE_LENGTH {
            return Err(CompareError::BufferTooSmall {
                needed: STEP1_MESSAGE_LENGTH,
            });
        }

        let secret = self.secret_input.finalize()?;
        let rand2 = crypto::random_scalar(&mut self.rng);
        let rand3 = crypto::random_scalar(&mut self.rng);

        let message = Step1Message {
            g2_half: EdwardsPoint::mul_base(&rand2),
            g2_proof: proof::prove_dlog(&mut self.rng, POS_G2_INITIATOR, &rand2),
            g3_half: EdwardsPoint::mul_base(&rand3),
            g3_proof: proof::prove_dlog(&mut self.rng, POS_G3_INITIATOR, &rand3),
        };
        protocol::write_step1(&message, output)?;

        self.secret = secret;
        self.rand2 = rand2;
        self.rand3 = rand3;
        self.state = State::AwaitingStep2;
        Ok(STEP1_MESSAGE_LENGTH)
    }

    /// Consumes a peer message, advances the protocol, and either writes
    /// the next message or completes the comparison.
    ///
    /// A first call on a context that never began a comparison accepts the
    /// peer's step 1 and takes the responder role.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::BufferTooSmall`] with the required length if
    /// `output` cannot hold the reply (the context is unchanged, retry with
    /// a larger buffer), [`CompareError::InvalidParameter`] for empty input
    /// or a finished context, [`CompareError::MalformedMessage`] or
    /// [`CompareError::InvalidProof`] when validation fails (the context
    /// becomes terminal), and [`CompareError::ProtocolFailed`] on every
    /// call after that.
    pub fn proceed_compare(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> CompareResult<StepOutcome> {
        if input.is_empty() {
            return Err(CompareError::InvalidParameter);
        }
        let outcome = match self.state {
            State::Idle => self.respond_step2(input, output).map(StepOutcome::SendToPeer),
            State::AwaitingStep2 => self
                .advance_step3(input, output)
                .map(StepOutcome::SendToPeer),
            State::AwaitingStep3 => self
                .finish_responder(input, output)
                .map(StepOutcome::SendToPeer),
            State::AwaitingStep4 => {
                self.finish_initiator(input).map(|()| StepOutcome::Complete)
            }
            State::Done => Err(CompareError::InvalidParameter),
            State::Failed => Err(CompareError::ProtocolFailed),
        };
        if let Err(CompareError::MalformedMessage | CompareError::InvalidProof) = outcome {
            self.fail();
        }
        outcome
    }

    /// Returns the verdict, or [`MatchResult::NotReady`] while the
    /// protocol is still in flight (including failed contexts).
    pub fn get_result(&self) -> MatchResult {
        if self.state == State::Done {
            self.result
        } else {
            MatchResult::NotReady
        }
    }

    /// Returns `true` once the protocol has completed on this side.
    pub fn is_complete(&self) -> bool {
        self.state == State::Done
    }

    /// Responder: consume step 1, publish generator halves and the
    /// commitment pair.
    fn respond_step2(&mut self, input: &[u8], output: &mut [u8]) -> CompareResult<usize> {
        let message = protocol::parse_step1(input)?;
        if output.len() < STEP2_MESSAGE_LENGTH {
            return Err(CompareError::BufferTooSmall {
                needed: STEP2_MESSAGE_LENGTH,
            });
        }
        proof::verify_dlog(POS_G2_INITIATOR, &message.g2_half, &message.g2_proof)?;
        proof::verify_dlog(POS_G3_INITIATOR, &message.g3_half, &message.g3_proof)?;

        let secret = self.secret_input.finalize()?;
        let rand2 = crypto::random_scalar(&mut self.rng);
        let rand3 = crypto::random_scalar(&mut self.rng);
        let rand = crypto::random_scalar(&mut self.rng);

        let g2 = message.g2_half * rand2;
        let g3 = message.g3_half * rand3;
        let commitment_p = g3 * rand;
        let commitment_q = EdwardsPoint::mul_base(&rand) + g2 * secret;

        let reply = Step2Message {
            g2_half: EdwardsPoint::mul_base(&rand2),
            g2_proof: proof::prove_dlog(&mut self.rng, POS_G2_RESPONDER, &rand2),
            g3_half: EdwardsPoint::mul_base(&rand3),
            g3_proof: proof::prove_dlog(&mut self.rng, POS_G3_RESPONDER, &rand3),
            commitment_p,
            commitment_q,
            commitment_proof: proof::prove_double_base(
                &mut self.rng,
                POS_COMMITMENT_RESPONDER,
                &rand,
                &secret,
                &g2,
                &g3,
            ),
        };
        protocol::write_step2(&reply, output)?;

        // Identity generators can only come from a degenerate peer; the
        // run continues but can no longer end in a match.
        if g2.is_identity() || g3.is_identity() {
            self.result = MatchResult::NoMatch;
        }
        self.secret = secret;
        self.rand = rand;
        self.rand2 = rand2;
        self.rand3 = rand3;
        self.g2 = g2;
        self.g3 = g3;
        self.peer_g3_half = message.g3_half;
        self.commitment_p = commitment_p;
        self.commitment_q = commitment_q;
        self.state = State::AwaitingStep3;
        Ok(STEP2_MESSAGE_LENGTH)
    }

    /// Initiator: consume step 2, publish the commitment pair and the
    /// blinded commitment difference.
    fn advance_step3(&mut self, input: &[u8], output: &mut [u8]) -> CompareResult<usize> {
        let message = protocol::parse_step2(input)?;
        if output.len() < STEP3_MESSAGE_LENGTH {
            return Err(CompareError::BufferTooSmall {
                needed: STEP3_MESSAGE_LENGTH,
            });
        }
        proof::verify_dlog(POS_G2_RESPONDER, &message.g2_half, &message.g2_proof)?;
        proof::verify_dlog(POS_G3_RESPONDER, &message.g3_half, &message.g3_proof)?;

        let g2 = message.g2_half * self.rand2;
        let g3 = message.g3_half * self.rand3;
        proof::verify_double_base(
            POS_COMMITMENT_RESPONDER,
            &g2,
            &g3,
            &message.commitment_p,
            &message.commitment_q,
            &message.commitment_proof,
        )?;

        let rand = crypto::random_scalar(&mut self.rng);
        let commitment_p = g3 * rand;
        let commitment_q = EdwardsPoint::mul_base(&rand) + g2 * self.secret;
        let commitment_diff = commitment_q - message.commitment_q;
        let blinded_diff = commitment_diff * self.rand3;

        let reply = Step3Message {
            commitment_p,
            commitment_q,
            commitment_proof: proof::prove_double_base(
                &mut self.rng,
                POS_COMMITMENT_INITIATOR,
                &rand,
                &self.secret,
                &g2,
                &g3,
            ),
            blinded_diff,
            blinded_diff_proof: proof::prove_dlog_eq(
                &mut self.rng,
                POS_DIFF_INITIATOR,
                &self.rand3,
                &commitment_diff,
            ),
        };
        protocol::write_step3(&reply, output)?;

        if g2.is_identity() || g3.is_identity() {
            self.result = MatchResult::NoMatch;
        }
        self.rand = rand;
        self.g2 = g2;
        self.g3 = g3;
        self.peer_g3_half = message.g3_half;
        self.commitment_p = commitment_p;
        self.commitment_q = commitment_q;
        self.peer_commitment_p = message.commitment_p;
        self.commitment_diff = commitment_diff;
        self.state = State::AwaitingStep4;
        Ok(STEP3_MESSAGE_LENGTH)
    }

    /// Responder: consume step 3, publish its own blinded difference, and
    /// settle the verdict.
    fn finish_responder(&mut self, input: &[u8], output: &mut [u8]) -> CompareResult<usize> {
        let message = protocol::parse_step3(input)?;
        if output.len() < STEP4_MESSAGE_LENGTH {
            return Err(CompareError::BufferTooSmall {
                needed: STEP4_MESSAGE_LENGTH,
            });
        }
        proof::verify_double_base(
            POS_COMMITMENT_INITIATOR,
            &self.g2,
            &self.g3,
            &message.commitment_p,
            &message.commitment_q,
            &message.commitment_proof,
        )?;

        let commitment_diff = message.commitment_q - self.commitment_q;
        proof::verify_dlog_eq(
            POS_DIFF_INITIATOR,
            &self.peer_g3_half,
            &commitment_diff,
            &message.blinded_diff,
            &message.blinded_diff_proof,
        )?;

        let blinded_diff = commitment_diff * self.rand3;
        let combined = message.blinded_diff * self.rand3;

        let reply = Step4Message {
            blinded_diff,
            blinded_diff_proof: proof::prove_dlog_eq(
                &mut self.rng,
                POS_DIFF_RESPONDER,
                &self.rand3,
                &commitment_diff,
            ),
        };
        protocol::write_step4(&reply, output)?;

        self.settle_verdict(&combined, &(message.commitment_p - self.commitment_p));
        self.secret.zeroize();
        self.state = State::Done;
        Ok(STEP4_MESSAGE_LENGTH)
    }

    /// Initiator: consume step 4 and settle the verdict. Produces no
    /// output.
    fn finish_initiator(&mut self, input: &[u8]) -> CompareResult<()> {
        let message = protocol::parse_step4(input)?;
        proof::verify_dlog_eq(
            POS_DIFF_RESPONDER,
            &self.peer_g3_half,
            &self.commitment_diff,
            &message.blinded_diff,
            &message.blinded_diff_proof,
        )?;

        let combined = message.blinded_diff * self.rand3;

        self.settle_verdict(&combined, &(self.commitment_p - self.peer_commitment_p));
        self.secret.zeroize();
        self.state = State::Done;
        Ok(())
    }

    /// The equality test: `combined` folds both parties' blinding factors
    /// over the commitment difference, and equals `p_diff` exactly when the
    /// secrets cancel in the exponent. An identity `combined` means a
    /// degenerate peer; an earlier no-match flag is never overwritten.
    fn settle_verdict(&mut self, combined: &EdwardsPoint, p_diff: &EdwardsPoint) {
        if combined.is_identity() {
            self.result = MatchResult::NoMatch;
        }
        if self.result == MatchResult::NotReady {
            self.result = if combined == p_diff {
                MatchResult::Match
            } else {
                MatchResult::NoMatch
            };
        }
    }

    /// Wipes all scalar material and pins the context in the terminal
    /// failed state.
    fn fail(&mut self) {
        self.secret.zeroize();
        self.rand.zeroize();
        self.rand2.zeroize();
        self.rand3.zeroize();
        self.state = State::Failed;
    }
}

impl<R> Drop for SecureComparator<R> {
    fn drop(&mut self) {
        self.secret.zeroize();
        self.rand.zeroize();
        self.rand2.zeroize();
        self.rand3.zeroize();
    }
}
