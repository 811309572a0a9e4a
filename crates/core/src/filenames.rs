// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Construction and parsing of the on-disk artifact names the pipeline and
//! checkpoint/restart protocol agree on: `candidates_<k>_<T>`,
//! `moduli_<k>_<T>`, the sidecar `.candidates_<k>_<T>`, and the final
//! `ssh2-moduli_<T>` output file.

use crate::key_length::KeyLength;
use crate::timestamp::CompactTimestamp;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    #[error("{0:?} does not match the candidates/moduli sidecar naming convention")]
    NotASidecar(String),

    #[error("invalid key length in filename {0:?}: {1}")]
    InvalidKeyLength(String, #[source] crate::validation::ValidationError),

    #[error("invalid compact timestamp in filename {0:?}: {1}")]
    InvalidTimestamp(String, #[source] crate::timestamp::TimestampError),
}

fn sidecar_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"^\.candidates_(\d+)_(\d+)$") {
        Ok(re) => re,
        Err(_) => unreachable!("sidecar pattern is a fixed, known-good literal"),
    })
}

/// `<candidates-dir>/candidates_<k>_<T>`.
pub fn candidates_path(dir: &Path, key_length: KeyLength, timestamp: CompactTimestamp) -> PathBuf {
    dir.join(format!(
        "candidates_{}_{}",
        key_length.bits(),
        timestamp.compact()
    ))
}

/// `<moduli-dir>/moduli_<k>_<T>`, sharing `k` and `T` with the candidates
/// file that produced it.
pub fn moduli_path(dir: &Path, key_length: KeyLength, timestamp: CompactTimestamp) -> PathBuf {
    dir.join(format!(
        "moduli_{}_{}",
        key_length.bits(),
        timestamp.compact()
    ))
}

/// The sidecar checkpoint path `ssh-keygen` maintains alongside a
/// candidates file while screening is in progress: same directory, same
/// stem, with a leading dot.
pub fn sidecar_path(candidates_path: &Path) -> Option<PathBuf> {
    let file_name = candidates_path.file_name()?.to_str()?;
    Some(candidates_path.with_file_name(format!(".{file_name}")))
}

/// The candidates path a sidecar was derived from: the same path with the
/// leading dot removed from the file name.
pub fn candidates_path_from_sidecar(sidecar_path: &Path) -> Option<PathBuf> {
    let file_name = sidecar_path.file_name()?.to_str()?;
    let stripped = file_name.strip_prefix('.')?;
    Some(sidecar_path.with_file_name(stripped))
}

/// `<moduli_home>/ssh2-moduli_<T>`, the final assembled output file.
pub fn output_path(moduli_home: &Path, timestamp: CompactTimestamp) -> PathBuf {
    moduli_home.join(format!("ssh2-moduli_{}", timestamp.compact()))
}

/// A discovered sidecar checkpoint: the key length and compact timestamp
/// recovered from its filename, per the checkpoint/restart discovery
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidecarMatch {
    pub key_length: KeyLength,
    pub timestamp: CompactTimestamp,
}

/// Match a file name against the sidecar checkpoint pattern
/// `^\.candidates_(\d+)_(\d+)$` and recover its key length and timestamp.
/// Returns `Ok(None)` for a name that simply isn't a sidecar; an `Err` only
/// for a name that matches the pattern but carries malformed digits.
pub fn parse_sidecar(file_name: &str) -> Result<Option<SidecarMatch>, FilenameError> {
    let Some(captures) = sidecar_pattern().captures(file_name) else {
        return Ok(None);
    };
    let size_str = &captures[1];
    let timestamp_str = &captures[2];

    let bits: u32 = size_str
        .parse()
        .map_err(|_| FilenameError::NotASidecar(file_name.to_string()))?;
    let key_length = KeyLength::new(bits)
        .map_err(|e| FilenameError::InvalidKeyLength(file_name.to_string(), e))?;
    let timestamp = CompactTimestamp::parse(timestamp_str)
        .map_err(|e| FilenameError::InvalidTimestamp(file_name.to_string(), e))?;

    Ok(Some(SidecarMatch {
        key_length,
        timestamp,
    }))
}

#[cfg(test)]
#[path = "filenames_tests.rs"]
mod tests;
