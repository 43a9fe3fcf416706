use std::ffi::c_void;
use std::ptr;

use compare_core::types::{
    MAX_MESSAGE_LENGTH, STEP1_MESSAGE_LENGTH, STEP2_MESSAGE_LENGTH,
};
use compare_ffi::{
    compare_append_secret, compare_begin_compare, compare_create, compare_destroy,
    compare_get_result, compare_proceed_compare, COMPARE_BUFFER_TOO_SMALL,
    COMPARE_INVALID_PARAMETER, COMPARE_MATCH, COMPARE_NOT_READY, COMPARE_NO_MATCH,
    COMPARE_SEND_OUTPUT_TO_PEER, COMPARE_SUCCESS,
};

unsafe fn create() -> *mut c_void {
    let mut handle: *mut c_void = ptr::null_mut();
    assert_eq!(compare_create(&mut handle), COMPARE_SUCCESS);
    assert!(!handle.is_null());
    handle
}

unsafe fn append(handle: *mut c_void, secret: &[u8]) {
    assert_eq!(
        compare_append_secret(handle, secret.as_ptr(), secret.len()),
        COMPARE_SUCCESS
    );
}

/// Ferries messages between two handles until the initiator completes.
unsafe fn run_protocol(alice: *mut c_void, bob: *mut c_void) {
    let mut message = vec![0u8; MAX_MESSAGE_LENGTH];
    let mut length = message.len();
    assert_eq!(
        compare_begin_compare(alice, message.as_mut_ptr(), &mut length),
        COMPARE_SEND_OUTPUT_TO_PEER
    );

    let mut peers = [bob, alice];
    loop {
        let peer = peers[0];
        peers.swap(0, 1);

        let mut output = vec![0u8; MAX_MESSAGE_LENGTH];
        let mut output_length = output.len();
        let status = compare_proceed_compare(
            peer,
            message.as_ptr(),
            length,
            output.as_mut_ptr(),
            &mut output_length,
        );
        match status {
            COMPARE_SEND_OUTPUT_TO_PEER => {
                assert!(output_length > 0);
                message = output;
                length = output_length;
            }
            COMPARE_SUCCESS => {
                assert_eq!(output_length, 0);
                break;
            }
            other => panic!("unexpected proceed status {other}"),
        }
    }
}

#[test]
fn create_rejects_null_out_pointer() {
    unsafe {
        assert_eq!(compare_create(ptr::null_mut()), COMPARE_INVALID_PARAMETER);
    }
}

#[test]
fn destroy_rejects_null_handle() {
    unsafe {
        assert_eq!(compare_destroy(ptr::null_mut()), COMPARE_INVALID_PARAMETER);
    }
}

#[test]
fn begin_reports_exact_size_then_accepts_it() {
    unsafe {
        let handle = create();
        append(handle, b"alice secret");

        let mut length: usize = 0;
        assert_eq!(
            compare_begin_compare(handle, ptr::null_mut(), &mut length),
            COMPARE_BUFFER_TOO_SMALL
        );
        assert_eq!(length, STEP1_MESSAGE_LENGTH);

        let mut output = vec![0u8; length];
        assert_eq!(
            compare_begin_compare(handle, output.as_mut_ptr(), &mut length),
            COMPARE_SEND_OUTPUT_TO_PEER
        );
        assert_eq!(length, STEP1_MESSAGE_LENGTH);

        assert_eq!(compare_destroy(handle), COMPARE_SUCCESS);
    }
}

#[test]
fn proceed_reports_exact_size_for_the_reply() {
    unsafe {
        let alice = create();
        let bob = create();
        append(alice, b"alice secret");
        append(bob, b"alice secret");

        let mut step1 = vec![0u8; STEP1_MESSAGE_LENGTH];
        let mut length = step1.len();
        assert_eq!(
            compare_begin_compare(alice, step1.as_mut_ptr(), &mut length),
            COMPARE_SEND_OUTPUT_TO_PEER
        );

        let mut reply_length: usize = 0;
        assert_eq!(
            compare_proceed_compare(
                bob,
                step1.as_ptr(),
                length,
                ptr::null_mut(),
                &mut reply_length
            ),
            COMPARE_BUFFER_TOO_SMALL
        );
        assert_eq!(reply_length, STEP2_MESSAGE_LENGTH);

        let mut reply = vec![0u8; reply_length];
        assert_eq!(
            compare_proceed_compare(
                bob,
                step1.as_ptr(),
                length,
                reply.as_mut_ptr(),
                &mut reply_length
            ),
            COMPARE_SEND_OUTPUT_TO_PEER
        );
        assert_eq!(reply_length, STEP2_MESSAGE_LENGTH);

        assert_eq!(compare_destroy(alice), COMPARE_SUCCESS);
        assert_eq!(compare_destroy(bob), COMPARE_SUCCESS);
    }
}

#[test]
fn full_comparison_over_the_c_surface() {
    unsafe {
        let alice = create();
        let bob = create();
        append(alice, b"alice secret");
        append(bob, b"alice secret");

        assert_eq!(compare_get_result(alice), COMPARE_NOT_READY);

        run_protocol(alice, bob);

        assert_eq!(compare_get_result(alice), COMPARE_MATCH);
        assert_eq!(compare_get_result(bob), COMPARE_MATCH);

        assert_eq!(compare_destroy(alice), COMPARE_SUCCESS);
        assert_eq!(compare_destroy(bob), COMPARE_SUCCESS);
    }
}

#[test]
fn different_secrets_over_the_c_surface() {
    unsafe {
        let alice = create();
        let bob = create();
        append(alice, b"alice secret");
        append(bob, b"bob secret");

        run_protocol(alice, bob);

        assert_eq!(compare_get_result(alice), COMPARE_NO_MATCH);
        assert_eq!(compare_get_result(bob), COMPARE_NO_MATCH);

        assert_eq!(compare_destroy(alice), COMPARE_SUCCESS);
        assert_eq!(compare_destroy(bob), COMPARE_SUCCESS);
    }
}

#[test]
fn append_rejects_invalid_arguments() {
    unsafe {
        let handle = create();
        assert_eq!(
            compare_append_secret(handle, ptr::null(), 4),
            COMPARE_INVALID_PARAMETER
        );
        assert_eq!(
            compare_append_secret(handle, b"data".as_ptr(), 0),
            COMPARE_INVALID_PARAMETER
        );
        assert_eq!(
            compare_append_secret(ptr::null_mut(), b"data".as_ptr(), 4),
            COMPARE_INVALID_PARAMETER
        );
        assert_eq!(compare_destroy(handle), COMPARE_SUCCESS);
    }
}

#[test]
fn append_after_begin_is_rejected() {
    unsafe {
        let handle = create();
        append(handle, b"alice secret");

        let mut output = vec![0u8; STEP1_MESSAGE_LENGTH];
        let mut length = output.len();
        assert_eq!(
            compare_begin_compare(handle, output.as_mut_ptr(), &mut length),
            COMPARE_SEND_OUTPUT_TO_PEER
        );
        assert_eq!(
            compare_append_secret(handle, b"more".as_ptr(), 4),
            COMPARE_INVALID_PARAMETER
        );
        // Destroying mid-protocol is always valid.
        assert_eq!(compare_destroy(handle), COMPARE_SUCCESS);
    }
}
