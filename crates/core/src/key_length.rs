// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key length validation and the `bits` / `bits-1` conventions.

use crate::validation::ValidationError;
use std::fmt;

/// Lower bound (inclusive) for a valid DH-GEX key length, in bits.
pub const MIN_KEY_LENGTH: u32 = 3072;

/// Upper bound (inclusive) for a valid DH-GEX key length, in bits.
pub const MAX_KEY_LENGTH: u32 = 8192;

/// Default set of key lengths generated when none are configured.
pub const DEFAULT_KEY_LENGTHS: [u32; 5] = [3072, 4096, 6144, 7680, 8192];

/// A validated DH-GEX key length in bits (e.g. 3072, 4096, ...).
///
/// `ssh-keygen` records a modulus's size as `bits - 1` in file output and in
/// the store; see [`KeyLength::stored_size`] for that conversion. A
/// `KeyLength` always holds the bit length itself, never the stored size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyLength(u32);

impl KeyLength {
    /// Validate and construct a `KeyLength`.
    ///
    /// Rejects values outside `[3072, 8192]` or not a multiple of 8, per
    /// the validator contract in the subprocess harness spec.
    pub fn new(bits: u32) -> Result<Self, ValidationError> {
        if bits < MIN_KEY_LENGTH || bits > MAX_KEY_LENGTH || bits % 8 != 0 {
            return Err(ValidationError::InvalidKeyLength { value: bits as i64 });
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// The `bits-1` value `ssh-keygen` emits as the `size` field.
    pub fn stored_size(self) -> u32 {
        self.0 - 1
    }

    /// Recover a `KeyLength` from a stored `size` (`bits-1`) value.
    pub fn from_stored_size(size: u32) -> Result<Self, ValidationError> {
        Self::new(size + 1)
    }

    pub fn default_set() -> Vec<Self> {
        DEFAULT_KEY_LENGTHS
            .iter()
            .copied()
            .map(|bits| Self(bits))
            .collect()
    }
}

impl fmt::Display for KeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for KeyLength {
    type Error = ValidationError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

#[cfg(test)]
#[path = "key_length_tests.rs"]
mod tests;
