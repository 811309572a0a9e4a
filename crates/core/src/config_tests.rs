// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn with_home_derives_subdirectories() {
    let cfg = Config::with_home("/var/lib/moduli");
    assert_eq!(cfg.candidates_dir, Path::new("/var/lib/moduli/candidates"));
    assert_eq!(cfg.moduli_dir, Path::new("/var/lib/moduli/moduli"));
    assert_eq!(cfg.log_dir, Path::new("/var/lib/moduli/log"));
    assert_eq!(cfg.records_per_keylength, 20);
    assert!(cfg.preserve_moduli_after_dbstore);
    assert!(!cfg.delete_records_on_moduli_write);
}

#[test]
fn default_config_validates() {
    let cfg = Config::with_home("/var/lib/moduli");
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_malformed_sql_identifiers() {
    let mut cfg = Config::with_home("/var/lib/moduli");
    cfg.table_name = "1moduli".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_zero_records_per_keylength() {
    let mut cfg = Config::with_home("/var/lib/moduli");
    cfg.records_per_keylength = 0;
    assert!(cfg.validate().is_err());
}
