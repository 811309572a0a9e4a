// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazy, forward-only parsing of candidate/moduli files.

use crate::error::CodecError;
use crate::line::{parse_line, ParsedLine};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A lazy, forward-only, finite iterator over the parsed lines of a moduli
/// file. Malformed lines are logged at warn level and dropped; they never
/// terminate the iterator early.
pub struct ModuliFileParser {
    path: PathBuf,
    lines: std::io::Lines<BufReader<File>>,
    line_no: usize,
}

impl ModuliFileParser {
    fn path_str(&self) -> String {
        self.path.display().to_string()
    }
}

impl Iterator for ModuliFileParser {
    type Item = ParsedLine;

    fn next(&mut self) -> Option<ParsedLine> {
        loop {
            let raw = match self.lines.next() {
                None => return None,
                Some(Ok(raw)) => raw,
                Some(Err(e)) => {
                    warn!(path = %self.path_str(), error = %e, "error reading line, stopping");
                    return None;
                }
            };
            self.line_no += 1;
            match parse_line(&self.path_str(), self.line_no, &raw) {
                Ok(Some(parsed)) => return Some(parsed),
                Ok(None) => continue,
                Err(e) => {
                    warn!(%e, "dropping unparsable line");
                    continue;
                }
            }
        }
    }
}

/// Open `path` and return a lazy iterator over its parsed lines.
///
/// Fails at file granularity only if the file cannot be opened or is
/// empty; individual malformed lines are dropped, not fatal.
pub fn parse_moduli_file(path: impl AsRef<Path>) -> Result<ModuliFileParser, CodecError> {
    let path = path.as_ref().to_path_buf();
    let metadata = std::fs::metadata(&path).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })?;
    if metadata.len() == 0 {
        return Err(CodecError::EmptyFile {
            path: path.display().to_string(),
        });
    }
    let file = File::open(&path).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(ModuliFileParser {
        path,
        lines: BufReader::new(file).lines(),
        line_no: 0,
    })
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
