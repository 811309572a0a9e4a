// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::fake::FakeHarness;
use std::path::Path;

#[tokio::test]
async fn generate_invokes_niced_ssh_keygen_with_bits_option() {
    let harness = FakeHarness::new();
    harness.push_success();

    let kl = KeyLength::new(3072).unwrap();
    let nice = NiceValue::new(15).unwrap();
    generate(&harness, kl, nice, Path::new("/candidates/candidates_3072_T"))
        .await
        .unwrap();

    let calls = harness.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "nice");
    assert!(calls[0].args.contains(&HarnessArg::Str("generate".to_string())));
    assert!(calls[0]
        .args
        .contains(&HarnessArg::Str("bits=3072".to_string())));
    assert!(calls[0].args.contains(&HarnessArg::NiceValue(15)));
}

#[tokio::test]
async fn screen_invokes_niced_ssh_keygen_with_in_and_out_paths() {
    let harness = FakeHarness::new();
    harness.push_success();

    let nice = NiceValue::new(15).unwrap();
    screen(
        &harness,
        nice,
        Path::new("/candidates/candidates_3072_T"),
        Path::new("/moduli/moduli_3072_T"),
    )
    .await
    .unwrap();

    let calls = harness.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].args.contains(&HarnessArg::Str("screen".to_string())));
    assert!(calls[0]
        .args
        .contains(&HarnessArg::Str("/candidates/candidates_3072_T".to_string())));
    assert!(calls[0]
        .args
        .contains(&HarnessArg::Str("/moduli/moduli_3072_T".to_string())));
}
