// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::io::Write;

#[test]
fn parses_a_file_skipping_comments_and_bad_lines() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# header").unwrap();
    writeln!(file, "# timestamp,type,tests,trials,size,generator,moduli").unwrap();
    writeln!(file, "20260728130509000000 2 6 100 3071 2 C805AABB").unwrap();
    writeln!(file, "not a valid line at all").unwrap();
    writeln!(file, "20260728130509111111 2 6 100 4095 2 FFEE0011").unwrap();

    let rows: Vec<_> = parse_moduli_file(file.path()).unwrap().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].size, 3071);
    assert_eq!(rows[1].size, 4095);
}

#[test]
fn empty_file_is_a_file_granularity_error() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert!(parse_moduli_file(file.path()).is_err());
}

#[test]
fn missing_file_is_a_file_granularity_error() {
    assert!(parse_moduli_file("/no/such/path/here").is_err());
}
