// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use moduli_core::KeyLength;
use moduli_subprocess::SubprocessError;
use moduli_store::StoreError;
use thiserror::Error;

/// A single key length's generate or screen task failed; aggregated by
/// the coordinator into [`PipelineError::PartialFailure`] when siblings in
/// the same phase succeeded.
#[derive(Debug, Error)]
#[error("key length {key_length}: {source}")]
pub struct TaskFailure {
    pub key_length: KeyLength,
    #[source]
    pub source: SubprocessError,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("subprocess failure: {0}")]
    Subprocess(#[from] SubprocessError),

    #[error("{failed} of {total} tasks in this phase failed")]
    PartialFailure {
        failed: usize,
        total: usize,
        errors: Vec<TaskFailure>,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("codec error: {0}")]
    Codec(#[from] moduli_codec::CodecError),

    #[error("filesystem error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed checkpoint sidecar: {0}")]
    Checkpoint(#[from] moduli_core::FilenameError),
}
