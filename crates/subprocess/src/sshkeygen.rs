// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two `ssh-keygen` invocations the pipeline drives: candidate
//! generation (`-M generate`) and safe-prime screening (`-M screen`).

use crate::error::SubprocessError;
use crate::harness::{CompletedRun, Harness, HarnessArg};
use moduli_core::{KeyLength, NiceValue};
use std::path::Path;

const SSH_KEYGEN: &str = "ssh-keygen";

/// Wrap a command in `nice -n <value>` so the child inherits the
/// configured scheduling priority; `ssh-keygen` itself has no niceness
/// flag, so the harness applies it at spawn time via the wrapper binary.
fn niced(program: &str, nice: NiceValue, args: &[HarnessArg]) -> (&'static str, Vec<HarnessArg>) {
    let mut wrapped = vec![
        HarnessArg::Str("-n".to_string()),
        HarnessArg::NiceValue(nice.value()),
        HarnessArg::Str(program.to_string()),
    ];
    wrapped.extend_from_slice(args);
    ("nice", wrapped)
}

/// Run `ssh-keygen -M generate -O bits=<k> <out>`.
pub async fn generate(
    harness: &dyn Harness,
    key_length: KeyLength,
    nice: NiceValue,
    out_path: &Path,
) -> Result<CompletedRun, SubprocessError> {
    let args = vec![
        HarnessArg::Str("-M".to_string()),
        HarnessArg::Str("generate".to_string()),
        HarnessArg::Str("-O".to_string()),
        HarnessArg::Str(format!("bits={}", key_length.bits())),
        HarnessArg::Str(path_arg(out_path)),
    ];
    let (program, args) = niced(SSH_KEYGEN, nice, &args);
    harness.run(program, &args).await
}

/// Run `ssh-keygen -M screen -f <candidates> <out>`.
pub async fn screen(
    harness: &dyn Harness,
    nice: NiceValue,
    candidates_path: &Path,
    out_path: &Path,
) -> Result<CompletedRun, SubprocessError> {
    let args = vec![
        HarnessArg::Str("-M".to_string()),
        HarnessArg::Str("screen".to_string()),
        HarnessArg::Str("-f".to_string()),
        HarnessArg::Str(path_arg(candidates_path)),
        HarnessArg::Str(path_arg(out_path)),
    ];
    let (program, args) = niced(SSH_KEYGEN, nice, &args);
    harness.run(program, &args).await
}

/// Render a path as a harness argument string. `ssh-keygen` paths are
/// filesystem paths built entirely from validated key lengths and compact
/// timestamps (see `moduli-core::filenames`), so this can never smuggle a
/// shell metacharacter that wasn't already present in `moduli_home`.
fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
#[path = "sshkeygen_tests.rs"]
mod tests;
