// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The configuration surface consumed by the core. Loading it from a file
//! or the environment is an external collaborator's responsibility; this
//! crate only defines the shape and validates it.

use crate::key_length::KeyLength;
use crate::nice_value::NiceValue;
use crate::validation::{self, ValidationError};
use std::path::{Path, PathBuf};

/// The configuration object every collaborator (harness, pipeline, store)
/// is handed a borrowed slice of. Constructed once per run, immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub moduli_home: PathBuf,
    pub candidates_dir: PathBuf,
    pub moduli_dir: PathBuf,
    pub log_dir: PathBuf,
    pub key_lengths: Vec<KeyLength>,
    pub nice_value: NiceValue,
    pub records_per_keylength: u32,
    pub db_name: String,
    pub table_name: String,
    pub view_name: String,
    pub archive_name: String,
    pub db_config_path: PathBuf,
    pub delete_records_on_moduli_write: bool,
    pub preserve_moduli_after_dbstore: bool,
}

impl Config {
    /// Derive the three working subdirectories from a base `moduli_home`,
    /// with the remaining fields set to their documented defaults.
    pub fn with_home(moduli_home: impl Into<PathBuf>) -> Self {
        let moduli_home = moduli_home.into();
        Self {
            candidates_dir: moduli_home.join("candidates"),
            moduli_dir: moduli_home.join("moduli"),
            log_dir: moduli_home.join("log"),
            moduli_home,
            key_lengths: KeyLength::default_set(),
            nice_value: NiceValue::default(),
            records_per_keylength: 20,
            db_name: "moduli_db".to_string(),
            table_name: "moduli".to_string(),
            view_name: "moduli_view".to_string(),
            archive_name: "moduli_archive".to_string(),
            db_config_path: moduli_home.join("db.cnf"),
            delete_records_on_moduli_write: false,
            preserve_moduli_after_dbstore: true,
        }
    }

    /// Validate every SQL identifier field. Key lengths and nice values are
    /// validated at construction time by their own newtypes and need no
    /// re-checking here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_sql_identifier(&self.db_name)?;
        validation::validate_sql_identifier(&self.table_name)?;
        validation::validate_sql_identifier(&self.view_name)?;
        validation::validate_sql_identifier(&self.archive_name)?;
        if self.records_per_keylength == 0 {
            return Err(ValidationError::InvalidArgument {
                value: "records_per_keylength must be >= 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn candidates_dir(&self) -> &Path {
        &self.candidates_dir
    }

    pub fn moduli_dir(&self) -> &Path {
        &self.moduli_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
