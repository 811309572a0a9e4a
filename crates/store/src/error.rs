// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use moduli_core::{KeyLength, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error(
        "insufficient records for key length {key_length}: requested {requested}, available {available}"
    )]
    InsufficientRecords {
        key_length: KeyLength,
        available: usize,
        requested: u32,
    },

    #[error("database error: {0}")]
    Database(String),
}
