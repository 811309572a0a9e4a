// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use moduli_core::ModuliConstants;
use proptest::prelude::*;

const SAMPLE: &str = "20260728130509000000 2 6 100 3071 2 C805AABBCCDD0557";

#[test]
fn parses_canonical_seven_field_line() {
    let parsed = parse_line("moduli_3072_T", 1, SAMPLE).unwrap().unwrap();
    assert_eq!(parsed.size, 3071);
    assert_eq!(parsed.tests, 6);
    assert_eq!(parsed.trials, 100);
    assert_eq!(parsed.generator, 2);
    assert_eq!(parsed.modulus_hex, "C805AABBCCDD0557");
}

#[test]
fn skips_comment_and_blank_lines_silently() {
    assert!(parse_line("f", 1, "# header comment").unwrap().is_none());
    assert!(parse_line("f", 2, "   ").unwrap().is_none());
    assert!(parse_line("f", 3, "").unwrap().is_none());
}

#[test]
fn rejects_wrong_field_count() {
    assert!(parse_line("f", 1, "1 2 3").is_err());
}

#[test]
fn rejects_lowercase_modulus_hex() {
    let bad = "20260728130509000000 2 6 100 3071 2 c805";
    assert!(parse_line("f", 1, bad).is_err());
}

#[test]
fn emit_round_trips_through_parse() {
    let parsed = parse_line("f", 1, SAMPLE).unwrap().unwrap();
    let constants = ModuliConstants {
        config_id: 1,
        generator_type: parsed.generator_type,
        tests: parsed.tests,
        trials: parsed.trials,
        generator: parsed.generator,
    };
    let modulus = parsed.clone().into_modulus(1).unwrap();
    let emitted = emit_line(&modulus, &constants);
    let reparsed = parse_line("f", 1, &emitted).unwrap().unwrap();
    assert_eq!(reparsed, parsed);
}

#[test]
fn matches_constants_detects_mismatched_tuple() {
    let parsed = parse_line("f", 1, SAMPLE).unwrap().unwrap();
    let matching = ModuliConstants {
        config_id: 1,
        generator_type: parsed.generator_type,
        tests: parsed.tests,
        trials: parsed.trials,
        generator: parsed.generator,
    };
    let mismatched = ModuliConstants {
        trials: parsed.trials + 1,
        ..matching
    };
    assert!(parsed.matches_constants(&matching));
    assert!(!parsed.matches_constants(&mismatched));
}

proptest! {
    #[test]
    fn line_round_trip_holds_for_any_valid_modulus(hex in "[0-9A-F]{4,64}") {
        let line = format!("20260728130509000000 2 6 100 3071 2 {hex}");
        let parsed = parse_line("f", 1, &line).unwrap().unwrap();
        let constants = ModuliConstants {
            config_id: 1,
            generator_type: parsed.generator_type,
            tests: parsed.tests,
            trials: parsed.trials,
            generator: parsed.generator,
        };
        let modulus = parsed.clone().into_modulus(1).unwrap();
        let emitted = emit_line(&modulus, &constants);
        let reparsed = parse_line("f", 1, &emitted).unwrap().unwrap();
        prop_assert_eq!(reparsed, parsed);
    }
}
