// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Emission of the final assembled moduli file.

use crate::error::CodecError;
use crate::line::emit_line;
use chrono::{DateTime, Utc};
use moduli_core::{Modulus, ModuliConstants};
use std::io::Write as _;
use std::path::Path;

/// The header comment line's identifying fields: the host that generated
/// the file and an identifier for the emitting process/run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuliFileHeader {
    pub hostname: String,
    pub emitter_id: String,
    pub generated_at: DateTime<Utc>,
}

impl ModuliFileHeader {
    fn render(&self) -> String {
        format!(
            "# {}::{}: ssh2 moduli generated at {}",
            self.hostname,
            self.emitter_id,
            self.generated_at.to_rfc3339()
        )
    }
}

const COLUMN_HEADER: &str = "# timestamp,type,tests,trials,size,generator,moduli";

/// Write the header comment, the column-header comment, then each row in
/// canonical form, sorted ascending by `size`. Each row pairs a `Modulus`
/// with the constants row it was stored under.
pub fn write_moduli_file(
    path: impl AsRef<Path>,
    header: &ModuliFileHeader,
    rows: &[(Modulus, ModuliConstants)],
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let mut sorted: Vec<&(Modulus, ModuliConstants)> = rows.iter().collect();
    sorted.sort_by_key(|(modulus, _)| modulus.size);

    let mut file = std::fs::File::create(path).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })?;

    writeln!(file, "{}", header.render()).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })?;
    writeln!(file, "{COLUMN_HEADER}").map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })?;
    for (modulus, constants) in sorted {
        writeln!(file, "{}", emit_line(modulus, constants)).map_err(|source| CodecError::Io {
            path: path.display().to_string(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "write_tests.rs"]
mod tests;
