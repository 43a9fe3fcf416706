use compare_agent::{CompareError, MatchResult, SecureComparator, StepOutcome};
use compare_core::types::{
    MAX_MESSAGE_LENGTH, STEP1_MESSAGE_LENGTH, STEP2_MESSAGE_LENGTH,
};

fn started_initiator() -> (SecureComparator, Vec<u8>) {
    let mut initiator = SecureComparator::new();
    initiator.append_secret(b"alice secret").unwrap();
    let mut buffer = vec![0u8; STEP1_MESSAGE_LENGTH];
    let written = initiator.begin_compare(&mut buffer).unwrap();
    buffer.truncate(written);
    (initiator, buffer)
}

#[test]
fn fresh_context_is_not_ready() {
    let comparator = SecureComparator::new();
    assert_eq!(comparator.get_result(), MatchResult::NotReady);
    assert!(!comparator.is_complete());
}

#[test]
fn append_rejects_empty_input() {
    let mut comparator = SecureComparator::new();
    assert_eq!(
        comparator.append_secret(&[]),
        Err(CompareError::InvalidParameter)
    );
}

#[test]
fn append_rejects_started_context() {
    let (mut initiator, _) = started_initiator();
    assert_eq!(
        initiator.append_secret(b"more"),
        Err(CompareError::InvalidParameter)
    );
}

#[test]
fn begin_rejects_started_context() {
    let (mut initiator, _) = started_initiator();
    let mut buffer = vec![0u8; STEP1_MESSAGE_LENGTH];
    assert_eq!(
        initiator.begin_compare(&mut buffer),
        Err(CompareError::InvalidParameter)
    );
}

#[test]
fn begin_reports_required_length_and_stays_retryable() {
    let mut initiator = SecureComparator::new();
    initiator.append_secret(b"alice secret").unwrap();

    assert_eq!(
        initiator.begin_compare(&mut []),
        Err(CompareError::BufferTooSmall {
            needed: STEP1_MESSAGE_LENGTH
        })
    );
    let mut short = vec![0u8; STEP1_MESSAGE_LENGTH - 1];
    assert_eq!(
        initiator.begin_compare(&mut short),
        Err(CompareError::BufferTooSmall {
            needed: STEP1_MESSAGE_LENGTH
        })
    );

    // The rejected calls left the context in place; the exact size works.
    let mut exact = vec![0u8; STEP1_MESSAGE_LENGTH];
    assert_eq!(initiator.begin_compare(&mut exact), Ok(STEP1_MESSAGE_LENGTH));
}

#[test]
fn proceed_reports_required_length_and_stays_retryable() {
    let (_, step1) = started_initiator();
    let mut responder = SecureComparator::new();
    responder.append_secret(b"alice secret").unwrap();

    assert_eq!(
        responder.proceed_compare(&step1, &mut []),
        Err(CompareError::BufferTooSmall {
            needed: STEP2_MESSAGE_LENGTH
        })
    );

    let mut exact = vec![0u8; STEP2_MESSAGE_LENGTH];
    assert_eq!(
        responder.proceed_compare(&step1, &mut exact),
        Ok(StepOutcome::SendToPeer(STEP2_MESSAGE_LENGTH))
    );
}

#[test]
fn proceed_rejects_empty_input() {
    let mut responder = SecureComparator::new();
    let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];
    assert_eq!(
        responder.proceed_compare(&[], &mut buffer),
        Err(CompareError::InvalidParameter)
    );
}

#[test]
fn malformed_input_pins_context_in_failed_state() {
    let mut responder = SecureComparator::new();
    responder.append_secret(b"alice secret").unwrap();
    let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];

    assert_eq!(
        responder.proceed_compare(&[0u8; 10], &mut buffer),
        Err(CompareError::MalformedMessage)
    );

    // Sticky: every protocol entry point now reports the failure.
    assert_eq!(
        responder.proceed_compare(&[0u8; 10], &mut buffer),
        Err(CompareError::ProtocolFailed)
    );
    assert_eq!(
        responder.begin_compare(&mut buffer),
        Err(CompareError::ProtocolFailed)
    );
    assert_eq!(
        responder.append_secret(b"late"),
        Err(CompareError::InvalidParameter)
    );
    assert_eq!(responder.get_result(), MatchResult::NotReady);
}

#[test]
fn tampered_message_fails_verification() {
    let (_, mut step1) = started_initiator();
    let mut responder = SecureComparator::new();
    responder.append_secret(b"alice secret").unwrap();
    let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];

    // Corrupt one byte of the first proof's challenge.
    step1[32] ^= 1;
    assert!(responder.proceed_compare(&step1, &mut buffer).is_err());
    assert_eq!(
        responder.proceed_compare(&step1, &mut buffer),
        Err(CompareError::ProtocolFailed)
    );
}

#[test]
fn completed_context_rejects_further_protocol_calls() {
    let mut initiator = SecureComparator::new();
    let mut responder = SecureComparator::new();
    initiator.append_secret(b"secret").unwrap();
    responder.append_secret(b"secret").unwrap();

    let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];
    let written = initiator.begin_compare(&mut buffer).unwrap();
    let mut message = buffer[..written].to_vec();
    loop {
        match responder.proceed_compare(&message, &mut buffer).unwrap() {
            StepOutcome::SendToPeer(n) => message = buffer[..n].to_vec(),
            StepOutcome::Complete => break,
        }
        match initiator.proceed_compare(&message, &mut buffer).unwrap() {
            StepOutcome::SendToPeer(n) => message = buffer[..n].to_vec(),
            StepOutcome::Complete => break,
        }
    }

    assert_eq!(
        initiator.proceed_compare(&message, &mut buffer),
        Err(CompareError::InvalidParameter)
    );
    assert_eq!(
        responder.proceed_compare(&message, &mut buffer),
        Err(CompareError::InvalidParameter)
    );
    assert_eq!(
        initiator.begin_compare(&mut buffer),
        Err(CompareError::InvalidParameter)
    );
}

#[test]
fn buffer_too_small_does_not_corrupt_the_run() {
    let mut initiator = SecureComparator::new();
    let mut responder = SecureComparator::new();
    initiator.append_secret(b"alice secret").unwrap();
    responder.append_secret(b"alice secret").unwrap();

    let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];
    assert!(initiator.begin_compare(&mut []).is_err());
    let written = initiator.begin_compare(&mut buffer).unwrap();
    let step1 = buffer[..written].to_vec();

    assert!(responder.proceed_compare(&step1, &mut []).is_err());
    let outcome = responder.proceed_compare(&step1, &mut buffer).unwrap();
    let mut message = match outcome {
        StepOutcome::SendToPeer(n) => buffer[..n].to_vec(),
        StepOutcome::Complete => unreachable!(),
    };

    loop {
        match initiator.proceed_compare(&message, &mut buffer).unwrap() {
            StepOutcome::SendToPeer(n) => message = buffer[..n].to_vec(),
            StepOutcome::Complete => break,
        }
        match responder.proceed_compare(&message, &mut buffer).unwrap() {
            StepOutcome::SendToPeer(n) => message = buffer[..n].to_vec(),
            StepOutcome::Complete => break,
        }
    }

    assert_eq!(initiator.get_result(), MatchResult::Match);
    assert_eq!(responder.get_result(), MatchResult::Match);
}
