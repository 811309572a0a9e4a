// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use proptest::prelude::*;

#[test]
fn accepts_defaults() {
    for bits in DEFAULT_KEY_LENGTHS {
        assert!(KeyLength::new(bits).is_ok());
    }
}

#[test]
fn rejects_below_minimum() {
    assert!(matches!(
        KeyLength::new(3064),
        Err(ValidationError::InvalidKeyLength { value: 3064 })
    ));
}

#[test]
fn rejects_above_maximum() {
    assert!(matches!(
        KeyLength::new(8200),
        Err(ValidationError::InvalidKeyLength { value: 8200 })
    ));
}

#[test]
fn rejects_non_multiple_of_eight() {
    assert!(matches!(
        KeyLength::new(4097),
        Err(ValidationError::InvalidKeyLength { value: 4097 })
    ));
}

#[test]
fn stored_size_round_trips() {
    let k = KeyLength::new(3072).unwrap();
    assert_eq!(k.stored_size(), 3071);
    assert_eq!(KeyLength::from_stored_size(3071).unwrap(), k);
}

proptest! {
    #[test]
    fn validator_rejects_every_out_of_range_or_misaligned_value(v in -10_000i64..20_000i64) {
        let in_range = (MIN_KEY_LENGTH as i64..=MAX_KEY_LENGTH as i64).contains(&v) && v % 8 == 0;
        if v < 0 || v > u32::MAX as i64 {
            return Ok(());
        }
        let result = KeyLength::new(v as u32);
        if in_range {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(ValidationError::InvalidKeyLength { .. })));
        }
    }
}
