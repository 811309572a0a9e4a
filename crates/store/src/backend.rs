// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The storage-backend capability boundary. Production code only ever
//! depends on this trait; tests substitute [`crate::memory_backend::MemoryBackend`]
//! behind the `test-support` feature.

use crate::error::StoreError;
use async_trait::async_trait;
use moduli_core::{KeyLength, Modulus, ModuliConstants};
use std::collections::HashMap;

/// Outcome of a `store` call: how many rows were newly inserted versus
/// rejected as duplicates. Duplicates are never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Overall verdict of a [`StorageBackend::verify_schema`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Passed,
    PassedWithWarnings,
    Failed,
}

/// Structured report of a schema verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub status: SchemaStatus,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl SchemaReport {
    pub fn passed() -> Self {
        Self {
            status: SchemaStatus::Passed,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// At-most-once persistence and balanced retrieval of screened moduli.
///
/// Every operation acquires a connection, executes in a single
/// transaction, and releases; no public operation leaves a transaction
/// open across a return.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Insert each row exactly once, identified by the hash of its
    /// `modulus-hex`. Rows whose hash already exists (in `moduli` or
    /// `moduli_archive`) are counted as duplicates, not errors.
    async fn store(&self, rows: &[Modulus]) -> Result<Counts, StoreError>;

    /// For each requested key length, return a uniformly-random sample of
    /// `n_per_length` live rows at that size. Fails closed (no rows
    /// returned at all) if any requested length has fewer than
    /// `n_per_length` available. Returned rows are sorted ascending by
    /// `size`.
    async fn retrieve_balanced(
        &self,
        n_per_length: u32,
        key_lengths: &[KeyLength],
    ) -> Result<Vec<(Modulus, ModuliConstants)>, StoreError>;

    /// Move each row from `moduli` to `moduli_archive`. Idempotent: a row
    /// already archived (by a concurrent consumer) is treated as already
    /// archived rather than an error.
    async fn consume(&self, rows: &[Modulus]) -> Result<(), StoreError>;

    /// Count of live rows per key length.
    async fn count_by_size(&self) -> Result<HashMap<KeyLength, usize>, StoreError>;

    /// Check expected tables, views, indexes, and foreign keys exist.
    async fn verify_schema(&self) -> Result<SchemaReport, StoreError>;

    /// The constants row referenced by a given `config_id`, used to
    /// resolve a `Modulus` into a full canonical-line tuple. Returns
    /// `None` if no such row exists.
    async fn constants(&self, config_id: moduli_core::ConfigId) -> Result<Option<ModuliConstants>, StoreError>;
}
