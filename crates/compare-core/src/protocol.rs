// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — Zero-Knowledge Secure Comparator
// Licensed under the MIT License

use curve25519_dalek::edwards::EdwardsPoint;

use crate::crypto;
use crate::proof::{DoubleBaseProof, SchnorrProof};
use crate::types::{
    CompareError, CompareResult, DOUBLE_BASE_PROOF_LENGTH, GE_LENGTH, SCHNORR_PROOF_LENGTH,
    STEP1_MESSAGE_LENGTH, STEP2_MESSAGE_LENGTH, STEP3_MESSAGE_LENGTH, STEP4_MESSAGE_LENGTH,
};

const STEP1_G2_OFFSET: usize = 0;
const STEP1_G2_PROOF_OFFSET: usize = GE_LENGTH;
const STEP1_G3_OFFSET: usize = 3 * GE_LENGTH;
const STEP1_G3_PROOF_OFFSET: usize = 4 * GE_LENGTH;

const STEP2_P_OFFSET: usize = 6 * GE_LENGTH;
const STEP2_Q_OFFSET: usize = 7 * GE_LENGTH;
const STEP2_COMMITMENT_PROOF_OFFSET: usize = 8 * GE_LENGTH;

const STEP3_P_OFFSET: usize = 0;
const STEP3_Q_OFFSET: usize = GE_LENGTH;
const STEP3_COMMITMENT_PROOF_OFFSET: usize = 2 * GE_LENGTH;
const STEP3_DIFF_OFFSET: usize = 5 * GE_LENGTH;
const STEP3_DIFF_PROOF_OFFSET: usize = 6 * GE_LENGTH;

const STEP4_DIFF_OFFSET: usize = 0;
const STEP4_DIFF_PROOF_OFFSET: usize = GE_LENGTH;

/// Step 1: the initiator's generator halves, each with a knowledge proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step1Message {
    pub g2_half: EdwardsPoint,
    pub g2_proof: SchnorrProof,
    pub g3_half: EdwardsPoint,
    pub g3_proof: SchnorrProof,
}

/// Step 2: the responder's generator halves plus its commitment pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step2Message {
    pub g2_half: EdwardsPoint,
    pub g2_proof: SchnorrProof,
    pub g3_half: EdwardsPoint,
    pub g3_proof: SchnorrProof,
    pub commitment_p: EdwardsPoint,
    pub commitment_q: EdwardsPoint,
    pub commitment_proof: DoubleBaseProof,
}

/// Step 3: the initiator's commitment pair and blinded commitment difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step3Message {
    pub commitment_p: EdwardsPoint,
    pub commitment_q: EdwardsPoint,
    pub commitment_proof: DoubleBaseProof,
    pub blinded_diff: EdwardsPoint,
    pub blinded_diff_proof: SchnorrProof,
}

/// Step 4: the responder's blinded commitment difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step4Message {
    pub blinded_diff: EdwardsPoint,
    pub blinded_diff_proof: SchnorrProof,
}

fn point_at(data: &[u8], offset: usize) -> CompareResult<EdwardsPoint> {
    crypto::decode_point(&data[offset..offset + GE_LENGTH])
}

fn schnorr_at(data: &[u8], offset: usize) -> CompareResult<SchnorrProof> {
    SchnorrProof::from_bytes(&data[offset..offset + SCHNORR_PROOF_LENGTH])
}

fn double_base_at(data: &[u8], offset: usize) -> CompareResult<DoubleBaseProof> {
    DoubleBaseProof::from_bytes(&data[offset..offset + DOUBLE_BASE_PROOF_LENGTH])
}

pub fn parse_step1(data: &[u8]) -> CompareResult<Step1Message> {
    if data.len() != STEP1_MESSAGE_LENGTH {
        return Err(CompareError::MalformedMessage);
    }
    Ok(Step1Message {
        g2_half: point_at(data, STEP1_G2_OFFSET)?,
        g2_proof: schnorr_at(data, STEP1_G2_PROOF_OFFSET)?,
        g3_half: point_at(data, STEP1_G3_OFFSET)?,
        g3_proof: schnorr_at(data, STEP1_G3_PROOF_OFFSET)?,
    })
}

pub fn parse_step2(data: &[u8]) -> CompareResult<Step2Message> {
    if data.len() != STEP2_MESSAGE_LENGTH {
        return Err(CompareError::MalformedMessage);
    }
    Ok(Step2Message {
        g2_half: point_at(data, STEP1_G2_OFFSET)?,
        g2_proof: schnorr_at(data, STEP1_G2_PROOF_OFFSET)?,
        g3_half: point_at(data, STEP1_G3_OFFSET)?,
        g3_proof: schnorr_at(data, STEP1_G3_PROOF_OFFSET)?,
        commitment_p: point_at(data, STEP2_P_OFFSET)?,
        commitment_q: point_at(data, STEP2_Q_OFFSET)?,
        commitment_proof: double_base_at(data, STEP2_COMMITMENT_PROOF_OFFSET)?,
    })
}

pub fn parse_step3(data: &[u8]) -> CompareResult<Step3Message> {
    if data.len() != STEP3_MESSAGE_LENGTH {
        return Err(CompareError::MalformedMessage);
    }
    Ok(Step3Message {
        commitment_p: point_at(data, STEP3_P_OFFSET)?,
        commitment_q: point_at(data, STEP3_Q_OFFSET)?,
        commitment_proof: double_base_at(data, STEP3_COMMITMENT_PROOF_OFFSET)?,
        blinded_diff: point_at(data, STEP3_DIFF_OFFSET)?,
        blinded_diff_proof: schnorr_at(data, STEP3_DIFF_PROOF_OFFSET)?,
    })
}

pub fn parse_step4(data: &[u8]) -> CompareResult<Step4Message> {
    if data.len() != STEP4_MESSAGE_LENGTH {
        return Err(CompareError::MalformedMessage);
    }
    Ok(Step4Message {
        blinded_diff: point_at(data, STEP4_DIFF_OFFSET)?,
        blinded_diff_proof: schnorr_at(data, STEP4_DIFF_PROOF_OFFSET)?,
    })
}

pub fn write_step1(message: &Step1Message, out: &mut [u8]) -> CompareResult<()> {
    if out.len() < STEP1_MESSAGE_LENGTH {
        return Err(CompareError::InvalidParameter);
    }
    write_halves(
        &message.g2_half,
        &message.g2_proof,
        &message.g3_half,
        &message.g3_proof,
        out,
    );
    Ok(())
}

pub fn write_step2(message: &Step2Message, out: &mut [u8]) -> CompareResult<()> {
    if out.len() < STEP2_MESSAGE_LENGTH {
        return Err(CompareError::InvalidParameter);
    }
    write_halves(
        &message.g2_half,
        &message.g2_proof,
        &message.g3_half,
        &message.g3_proof,
        out,
    );
    out[STEP2_P_OFFSET..STEP2_Q_OFFSET]
        .copy_from_slice(&crypto::encode_point(&message.commitment_p));
    out[STEP2_Q_OFFSET..STEP2_COMMITMENT_PROOF_OFFSET]
        .copy_from_slice(&crypto::encode_point(&message.commitment_q));
    out[STEP2_COMMITMENT_PROOF_OFFSET..STEP2_MESSAGE_LENGTH]
        .copy_from_slice(&message.commitment_proof.to_bytes());
    Ok(())
}

pub fn write_step3(message: &Step3Message, out: &mut [u8]) -> CompareResult<()> {
    if out.len() < STEP3_MESSAGE_LENGTH {
        return Err(CompareError::InvalidParameter);
    }
    out[STEP3_P_OFFSET..STEP3_Q_OFFSET]
        .copy_from_slice(&crypto::encode_point(&message.commitment_p));
    out[STEP3_Q_OFFSET..STEP3_COMMITMENT_PROOF_OFFSET]
        .copy_from_slice(&crypto::encode_point(&message.commitment_q));
    out[STEP3_COMMITMENT_PROOF_OFFSET..STEP3_DIFF_OFFSET]
        .copy_from_slice(&message.commitment_proof.to_bytes());
    out[STEP3_DIFF_OFFSET..STEP3_DIFF_PROOF_OFFSET]
        .copy_from_slice(&crypto::encode_point(&message.blinded_diff));
    out[STEP3_DIFF_PROOF_OFFSET..STEP3_MESSAGE_LENGTH]
        .copy_from_slice(&message.blinded_diff_proof.to_bytes());
    Ok(())
}

pub fn write_step4(message: &Step4Message, out: &mut [u8]) -> CompareResult<()> {
    if out.len() < STEP4_MESSAGE_LENGTH {
        return Err(CompareError::InvalidParameter);
    }
    out[STEP4_DIFF_OFFSET..STEP4_DIFF_PROOF_OFFSET]
        .copy_from_slice(&crypto::encode_point(&message.blinded_diff));
    out[STEP4_DIFF_PROOF_OFFSET..STEP4_MESSAGE_LENGTH]
        .copy_from_slice(&message.blinded_diff_proof.to_bytes());
    Ok(())
}

fn write_halves(
    g2_half: &EdwardsPoint,
    g2_proof: &SchnorrProof,
    g3_half: &EdwardsPoint,
    g3_proof: &SchnorrProof,
    out: &mut [u8],
) {
    out[STEP1_G2_OFFSET..STEP1_G2_PROOF_OFFSET].copy_from_slice(&crypto::encode_point(g2_half));
    out[STEP1_G2_PROOF_OFFSET..STEP1_G3_OFFSET].copy_from_slice(&g2_proof.to_bytes());
    out[STEP1_G3_OFFSET..STEP1_G3_PROOF_OFFSET].copy_from_slice(&crypto::encode_point(g3_half));
    out[STEP1_G3_PROOF_OFFSET..STEP1_MESSAGE_LENGTH].copy_from_slice(&g3_proof.to_bytes());
}
