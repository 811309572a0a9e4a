// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use proptest::prelude::*;

#[test]
fn default_is_fifteen() {
    assert_eq!(NiceValue::default().value(), 15);
}

#[test]
fn accepts_boundaries() {
    assert!(NiceValue::new(-20).is_ok());
    assert!(NiceValue::new(19).is_ok());
}

#[test]
fn rejects_outside_boundaries() {
    assert!(matches!(
        NiceValue::new(-21),
        Err(ValidationError::InvalidNiceValue { value: -21 })
    ));
    assert!(matches!(
        NiceValue::new(20),
        Err(ValidationError::InvalidNiceValue { value: 20 })
    ));
}

proptest! {
    #[test]
    fn validator_rejects_every_out_of_range_value(v in -1000i32..1000i32) {
        let result = NiceValue::new(v);
        if (MIN_NICE_VALUE..=MAX_NICE_VALUE).contains(&v) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(ValidationError::InvalidNiceValue { .. })));
        }
    }
}
