// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared validation errors and the argument/identifier validators every
//! boundary (subprocess harness, store, config) runs input through before
//! any side effect.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised by validation, before any side effect has occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid key length {value}: must be in [3072, 8192] and a multiple of 8")]
    InvalidKeyLength { value: i64 },

    #[error("invalid nice value {value}: must be in [-20, 19]")]
    InvalidNiceValue { value: i32 },

    #[error("invalid argument {value:?}: must match ^[A-Za-z0-9_./=:-]+$")]
    InvalidArgument { value: String },

    #[error("invalid SQL identifier {value:?}: must match ^[A-Za-z_][A-Za-z0-9_]*$")]
    InvalidSqlIdentifier { value: String },
}

fn argument_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"^[A-Za-z0-9_./=:-]+$") {
        Ok(re) => re,
        Err(_) => unreachable!("argument validator pattern is a fixed, known-good literal"),
    })
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$") {
        Ok(re) => re,
        Err(_) => unreachable!("identifier validator pattern is a fixed, known-good literal"),
    })
}

/// Validate a string command-line argument against the harness's whitelist
/// pattern. Used for every `ssh-keygen` argument that is not an integer.
pub fn validate_argument(value: &str) -> Result<(), ValidationError> {
    if argument_pattern().is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidArgument {
            value: value.to_string(),
        })
    }
}

/// Validate a SQL identifier (database/table/view name) read from
/// configuration. Identifiers are never parameterized by the wire protocol,
/// so they must be structurally validated before being concatenated into a
/// query.
pub fn validate_sql_identifier(value: &str) -> Result<(), ValidationError> {
    if identifier_pattern().is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSqlIdentifier {
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
