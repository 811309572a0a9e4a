// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The canonical `Modulus` record and its content-addressed hash.

use crate::constants::ConfigId;
use crate::timestamp::CompactTimestamp;
use crate::validation::ValidationError;
use sha2::{Digest, Sha512};
use std::fmt;
use std::sync::OnceLock;

fn hex_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match regex::Regex::new(r"^[0-9A-F]+$") {
        Ok(re) => re,
        Err(_) => unreachable!("modulus hex pattern is a fixed, known-good literal"),
    })
}

/// A screened safe prime, as produced by `ssh-keygen -M screen` and stored
/// in the moduli table.
///
/// `size` is the `bits-1` value `ssh-keygen` emits; it is never "corrected"
/// to the nominal key length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modulus {
    pub timestamp: CompactTimestamp,
    pub config_id: ConfigId,
    pub size: u32,
    pub modulus_hex: String,
}

impl Modulus {
    /// Validate and construct a `Modulus`. Rejects a `modulus_hex` that is
    /// not strictly uppercase hex digits.
    pub fn new(
        timestamp: CompactTimestamp,
        config_id: ConfigId,
        size: u32,
        modulus_hex: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let modulus_hex = modulus_hex.into();
        if modulus_hex.is_empty() || !hex_pattern().is_match(&modulus_hex) {
            return Err(ValidationError::InvalidArgument {
                value: modulus_hex,
            });
        }
        Ok(Self {
            timestamp,
            config_id,
            size,
            modulus_hex,
        })
    }

    /// The deterministic content-address of this modulus: SHA-512 of the
    /// hex string, itself hex-encoded. Mirrors the database's generated
    /// `modulus_hash` column so in-process dedup logic and the store agree.
    pub fn hash_hex(&self) -> String {
        let mut hasher = Sha512::new();
        hasher.update(self.modulus_hex.as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Modulus(timestamp={}, config_id={}, size={}, modulus_hex={}...)",
            self.timestamp,
            self.config_id,
            self.size,
            &self.modulus_hex[..self.modulus_hex.len().min(8)]
        )
    }
}

#[cfg(test)]
#[path = "modulus_tests.rs"]
mod tests;
