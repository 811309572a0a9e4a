// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// A single line of a candidates/moduli file could not be parsed into its
/// seven canonical fields. Dropped by the caller at line granularity; never
/// aborts the iterator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}:{line}: {reason}")]
pub struct FileParseError {
    pub path: String,
    pub line: usize,
    pub reason: String,
}

/// File-granularity failures: the file itself could not be opened, or was
/// empty.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: file is empty")]
    EmptyFile { path: String },

    #[error("{0}")]
    InvalidRecord(#[from] moduli_core::ValidationError),
}
