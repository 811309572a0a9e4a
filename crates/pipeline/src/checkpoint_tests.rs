// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn discovers_sidecar_and_derives_candidates_path() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = dir.path().join("candidates_3072_20260728130509000000");
    let sidecar = dir.path().join(".candidates_3072_20260728130509000000");
    std::fs::write(&candidates, b"").unwrap();
    std::fs::write(&sidecar, b"42").unwrap();
    std::fs::write(dir.path().join("unrelated.txt"), b"").unwrap();

    let jobs = discover_interrupted(dir.path()).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].candidates_path, candidates);
    assert_eq!(jobs[0].sidecar_path, sidecar);
    assert_eq!(jobs[0].sidecar.key_length.bits(), 3072);
}

#[test]
fn empty_directory_yields_no_jobs() {
    let dir = tempfile::tempdir().unwrap();
    assert!(discover_interrupted(dir.path()).unwrap().is_empty());
}
