// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The canonical moduli line: seven whitespace-separated fields
//! `timestamp type tests trials size generator modulus`.

use crate::error::FileParseError;
use moduli_core::{CompactTimestamp, ConfigId, GeneratorType, Modulus, ModuliConstants};
use std::fmt;

/// A single parsed line, before it has been matched against a known
/// `config_id`. The file format carries the generator-type/tests/trials/
/// generator tuple inline, not the constants row it was assigned from, so
/// that resolution is deferred to the caller (see [`ParsedLine::into_modulus`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: CompactTimestamp,
    pub generator_type: GeneratorType,
    pub tests: u32,
    pub trials: u32,
    pub size: u32,
    pub generator: u32,
    pub modulus_hex: String,
}

impl ParsedLine {
    /// Does this line's inline tuple match a known constants row?
    pub fn matches_constants(&self, constants: &ModuliConstants) -> bool {
        self.generator_type == constants.generator_type
            && self.tests == constants.tests
            && self.trials == constants.trials
            && self.generator == constants.generator
    }

    /// Resolve this line into a storable `Modulus`, under the assumption
    /// the caller has already confirmed `config_id` matches this line's
    /// inline tuple (see [`ParsedLine::matches_constants`]).
    pub fn into_modulus(self, config_id: ConfigId) -> Result<Modulus, moduli_core::ValidationError> {
        Modulus::new(self.timestamp, config_id, self.size, self.modulus_hex)
    }
}

/// Parse one non-comment, non-blank line into its seven canonical fields.
/// Returns `Ok(None)` for lines that are comments (`#`-prefixed) or
/// entirely whitespace; an `Err` for any line with the wrong field count or
/// a malformed field, tagged with `path`/`line_no` for the caller's
/// warning log.
pub fn parse_line(path: &str, line_no: usize, raw: &str) -> Result<Option<ParsedLine>, FileParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() != 7 {
        return Err(FileParseError {
            path: path.to_string(),
            line: line_no,
            reason: format!("expected 7 fields, found {}", fields.len()),
        });
    }

    let err = |reason: String| FileParseError {
        path: path.to_string(),
        line: line_no,
        reason,
    };

    let timestamp = CompactTimestamp::parse(fields[0])
        .map_err(|e| err(format!("bad timestamp: {e}")))?;
    let generator_type: GeneratorType = fields[1]
        .parse()
        .map_err(|e| err(format!("bad generator type: {e}")))?;
    let tests: u32 = fields[2]
        .parse()
        .map_err(|_| err(format!("bad tests field {:?}", fields[2])))?;
    let trials: u32 = fields[3]
        .parse()
        .map_err(|_| err(format!("bad trials field {:?}", fields[3])))?;
    let size: u32 = fields[4]
        .parse()
        .map_err(|_| err(format!("bad size field {:?}", fields[4])))?;
    let generator: u32 = fields[5]
        .parse()
        .map_err(|_| err(format!("bad generator field {:?}", fields[5])))?;
    let modulus_hex = fields[6].to_string();

    if modulus_hex.is_empty() || !modulus_hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()) {
        return Err(err(format!("bad modulus field {modulus_hex:?}")));
    }

    Ok(Some(ParsedLine {
        timestamp,
        generator_type,
        tests,
        trials,
        size,
        generator,
        modulus_hex,
    }))
}

/// Render the canonical seven-field line for a modulus, in the constants
/// row it was stored under.
pub fn emit_line(modulus: &Modulus, constants: &ModuliConstants) -> String {
    format!(
        "{} {} {} {} {} {} {}",
        modulus.timestamp,
        constants.generator_type.as_str(),
        constants.tests,
        constants.trials,
        modulus.size,
        constants.generator,
        modulus.modulus_hex
    )
}

impl fmt::Display for ParsedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.timestamp,
            self.generator_type.as_str(),
            self.tests,
            self.trials,
            self.size,
            self.generator,
            self.modulus_hex
        )
    }
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
