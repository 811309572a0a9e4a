// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use moduli_core::ValidationError;
use thiserror::Error;

/// Every non-success path the harness can take, as a distinct variant; the
/// harness never silently swallows a failure.
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    #[error("failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with non-zero status {code}")]
    SubprocessFailed { program: String, code: i32 },

    #[error("{program} was terminated by a signal")]
    SignalTerminated { program: String },

    #[error("error reading {stream} from {program}: {source}")]
    StreamError {
        program: String,
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },
}
