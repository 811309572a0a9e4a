// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[tokio::test]
async fn run_streams_stdout_and_succeeds_on_zero_exit() {
    let harness = ProcessHarness::new();
    let result = harness
        .run("echo", &[HarnessArg::Str("hello".to_string())])
        .await
        .unwrap();
    assert_eq!(result.exit_code, 0);
}

#[tokio::test]
async fn run_reports_nonzero_exit_as_subprocess_failed() {
    let harness = ProcessHarness::new();
    let result = harness.run("false", &[]).await;
    assert!(matches!(
        result,
        Err(SubprocessError::SubprocessFailed { code: 1, .. })
    ));
}

#[tokio::test]
async fn run_reports_missing_binary_as_spawn_failed() {
    let harness = ProcessHarness::new();
    let result = harness.run("/nonexistent/binary-xyz", &[]).await;
    assert!(matches!(result, Err(SubprocessError::SpawnFailed { .. })));
}

#[tokio::test]
async fn run_validates_key_length_before_spawning() {
    let harness = ProcessHarness::new();
    let result = harness
        .run("echo", &[HarnessArg::KeyLength(1024)])
        .await;
    assert!(matches!(result, Err(SubprocessError::InvalidArgument(_))));
}

#[tokio::test]
async fn run_validates_nice_value_before_spawning() {
    let harness = ProcessHarness::new();
    let result = harness.run("echo", &[HarnessArg::NiceValue(99)]).await;
    assert!(matches!(result, Err(SubprocessError::InvalidArgument(_))));
}

#[tokio::test]
async fn run_validates_string_arguments_before_spawning() {
    let harness = ProcessHarness::new();
    let result = harness
        .run("echo", &[HarnessArg::Str("; rm -rf /".to_string())])
        .await;
    assert!(matches!(result, Err(SubprocessError::InvalidArgument(_))));
}
