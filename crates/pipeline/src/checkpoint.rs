// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint discovery: scan the candidates directory for sidecar
//! checkpoints `ssh-keygen` left behind from an interrupted screening run.

use crate::error::PipelineError;
use moduli_core::filenames::{candidates_path_from_sidecar, parse_sidecar, SidecarMatch};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One interrupted screening job discovered on disk: its candidates file,
/// the sidecar marking it in-progress, and the key length/timestamp
/// recovered from the sidecar's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptedJob {
    pub candidates_path: PathBuf,
    pub sidecar_path: PathBuf,
    pub sidecar: SidecarMatch,
}

/// Scan `candidates_dir` for sidecar checkpoints. A name that matches the
/// sidecar pattern but carries malformed digits is logged and skipped,
/// rather than aborting discovery of the rest.
pub fn discover_interrupted(candidates_dir: &Path) -> Result<Vec<InterruptedJob>, PipelineError> {
    let mut jobs = Vec::new();

    let entries = std::fs::read_dir(candidates_dir).map_err(|source| PipelineError::Io {
        path: candidates_dir.display().to_string(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::Io {
            path: candidates_dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match parse_sidecar(file_name) {
            Ok(Some(sidecar)) => {
                let Some(candidates_path) = candidates_path_from_sidecar(&path) else {
                    continue;
                };
                jobs.push(InterruptedJob {
                    candidates_path,
                    sidecar_path: path,
                    sidecar,
                });
            }
            Ok(None) => continue,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping malformed sidecar");
                continue;
            }
        }
    }

    Ok(jobs)
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
