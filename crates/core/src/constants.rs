// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generator constants referenced by every stored modulus.

use serde::{Deserialize, Serialize};

/// Generator type used by `ssh-keygen -M screen`. The schema seeds only
/// `Two`; `Five` is accepted by the type but has no code path that selects
/// it today (see DESIGN.md Open Question: generator type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorType {
    Two,
    Five,
}

impl GeneratorType {
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorType::Two => "2",
            GeneratorType::Five => "5",
        }
    }

    pub fn value(self) -> u32 {
        match self {
            GeneratorType::Two => 2,
            GeneratorType::Five => 5,
        }
    }
}

impl std::str::FromStr for GeneratorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2" => Ok(GeneratorType::Two),
            "5" => Ok(GeneratorType::Five),
            other => Err(format!("unknown generator type {other:?}")),
        }
    }
}

/// Identifies an immutable row of [`ModuliConstants`] in the `constants`
/// table. `config_id = 1` is the schema's seeded default row.
pub type ConfigId = u32;

/// The generator-type / tests / trials / generator-value tuple referenced
/// by every stored modulus. Immutable after schema install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuliConstants {
    pub config_id: ConfigId,
    pub generator_type: GeneratorType,
    pub tests: u32,
    pub trials: u32,
    pub generator: u32,
}

impl ModuliConstants {
    /// The schema's seeded default: `config_id = 1`, generator type "2",
    /// tests bitmask 6, 100 trials, generator value 2.
    pub const DEFAULT: ModuliConstants = ModuliConstants {
        config_id: 1,
        generator_type: GeneratorType::Two,
        tests: 6,
        trials: 100,
        generator: 2,
    };
}

impl Default for ModuliConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "constants_tests.rs"]
mod tests;
