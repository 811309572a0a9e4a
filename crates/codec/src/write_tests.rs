// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::parse::parse_moduli_file;
use moduli_core::CompactTimestamp;

fn modulus(size: u32, hex: &str) -> Modulus {
    Modulus::new(
        CompactTimestamp::parse("20260728130509000000").unwrap(),
        1,
        size,
        hex,
    )
    .unwrap()
}

fn constants() -> ModuliConstants {
    ModuliConstants::default()
}

#[test]
fn writes_header_and_sorts_rows_by_size_ascending() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let header = ModuliFileHeader {
        hostname: "genhost".to_string(),
        emitter_id: "moduli-generator-1".to_string(),
        generated_at: Utc::now(),
    };
    let rows = vec![
        (modulus(8191, "FF00"), constants()),
        (modulus(3071, "C805"), constants()),
        (modulus(6143, "AABB"), constants()),
    ];
    write_moduli_file(file.path(), &header, &rows).unwrap();

    let contents = std::fs::read_to_string(file.path()).unwrap();
    let mut lines = contents.lines();
    assert!(lines.next().unwrap().starts_with("# genhost::moduli-generator-1"));
    assert_eq!(lines.next().unwrap(), COLUMN_HEADER);
    assert!(lines.next().unwrap().contains(" 3071 "));
    assert!(lines.next().unwrap().contains(" 6143 "));
    assert!(lines.next().unwrap().contains(" 8191 "));
}

#[test]
fn written_file_parses_back_to_the_same_moduli() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let header = ModuliFileHeader {
        hostname: "genhost".to_string(),
        emitter_id: "moduli-generator-1".to_string(),
        generated_at: Utc::now(),
    };
    let m = modulus(3071, "C805AABB");
    write_moduli_file(file.path(), &header, &[(m.clone(), constants())]).unwrap();

    let parsed: Vec<_> = parse_moduli_file(file.path()).unwrap().collect();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].clone().into_modulus(1).unwrap(), m);
}
