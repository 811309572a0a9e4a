// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::path::Path;

fn ts() -> CompactTimestamp {
    CompactTimestamp::parse("20260728130509000000").unwrap()
}

#[test]
fn candidates_and_moduli_paths_share_k_and_t() {
    let k = KeyLength::new(3072).unwrap();
    let candidates = candidates_path(Path::new("/candidates"), k, ts());
    let moduli = moduli_path(Path::new("/moduli"), k, ts());
    assert_eq!(
        candidates,
        Path::new("/candidates/candidates_3072_20260728130509000000")
    );
    assert_eq!(
        moduli,
        Path::new("/moduli/moduli_3072_20260728130509000000")
    );
}

#[test]
fn sidecar_path_adds_leading_dot_to_file_name_only() {
    let candidates = Path::new("/candidates/candidates_3072_20260728130509000000");
    let sidecar = sidecar_path(candidates).unwrap();
    assert_eq!(
        sidecar,
        Path::new("/candidates/.candidates_3072_20260728130509000000")
    );
    assert_eq!(candidates_path_from_sidecar(&sidecar).unwrap(), candidates);
}

#[test]
fn output_path_uses_ssh2_moduli_prefix() {
    let out = output_path(Path::new("/var/lib/moduli"), ts());
    assert_eq!(
        out,
        Path::new("/var/lib/moduli/ssh2-moduli_20260728130509000000")
    );
}

#[test]
fn parse_sidecar_recovers_key_length_and_timestamp() {
    let m = parse_sidecar(".candidates_3072_20260728130509000000")
        .unwrap()
        .unwrap();
    assert_eq!(m.key_length, KeyLength::new(3072).unwrap());
    assert_eq!(m.timestamp, ts());
}

#[test]
fn parse_sidecar_returns_none_for_non_sidecar_names() {
    assert!(parse_sidecar("candidates_3072_20260728130509000000")
        .unwrap()
        .is_none());
    assert!(parse_sidecar("moduli_3072_20260728130509000000")
        .unwrap()
        .is_none());
    assert!(parse_sidecar("unrelated.txt").unwrap().is_none());
}

#[test]
fn parse_sidecar_rejects_out_of_range_key_length() {
    assert!(parse_sidecar(".candidates_1024_20260728130509000000").is_err());
}
