// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`StorageBackend`] for tests: production code never
//! references this module directly.

use crate::backend::{Counts, SchemaReport, SchemaStatus, StorageBackend};
use crate::error::StoreError;
use async_trait::async_trait;
use moduli_core::{ConfigId, KeyLength, Modulus, ModuliConstants};
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use std::collections::HashMap;

#[derive(Default)]
struct State {
    live: HashMap<String, Modulus>,
    archived: HashMap<String, Modulus>,
    constants: HashMap<ConfigId, ModuliConstants>,
}

/// A single-process, in-memory stand-in for the MySQL backend. Enforces
/// the same at-most-once invariant across `live`/`archived` that the real
/// schema's two uniqueness constraints enforce.
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        let mut state = State::default();
        state.constants.insert(1, ModuliConstants::default());
        Self {
            state: Mutex::new(state),
        }
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a constants row, for tests that exercise a
    /// non-default `config_id`.
    pub fn put_constants(&self, constants: ModuliConstants) {
        self.state.lock().constants.insert(constants.config_id, constants);
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }

    pub fn archived_count(&self) -> usize {
        self.state.lock().archived.len()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn store(&self, rows: &[Modulus]) -> Result<Counts, StoreError> {
        let mut state = self.state.lock();
        let mut counts = Counts::default();
        for modulus in rows {
            let hash = modulus.hash_hex();
            if state.live.contains_key(&hash) || state.archived.contains_key(&hash) {
                counts.duplicates += 1;
                continue;
            }
            state.live.insert(hash, modulus.clone());
            counts.inserted += 1;
        }
        Ok(counts)
    }

    async fn retrieve_balanced(
        &self,
        n_per_length: u32,
        key_lengths: &[KeyLength],
    ) -> Result<Vec<(Modulus, ModuliConstants)>, StoreError> {
        let state = self.state.lock();
        let mut out = Vec::new();
        let mut rng = rand::rng();

        for &kl in key_lengths {
            let mut candidates: Vec<&Modulus> = state
                .live
                .values()
                .filter(|m| m.size == kl.stored_size())
                .collect();
            if candidates.len() < n_per_length as usize {
                return Err(StoreError::InsufficientRecords {
                    key_length: kl,
                    available: candidates.len(),
                    requested: n_per_length,
                });
            }
            candidates.shuffle(&mut rng);
            for modulus in candidates.into_iter().take(n_per_length as usize) {
                let constants = state
                    .constants
                    .get(&modulus.config_id)
                    .cloned()
                    .ok_or_else(|| {
                        StoreError::SchemaMismatch(format!(
                            "no constants row for config_id {}",
                            modulus.config_id
                        ))
                    })?;
                out.push((modulus.clone(), constants));
            }
        }

        out.sort_by_key(|(modulus, _)| modulus.size);
        Ok(out)
    }

    async fn consume(&self, rows: &[Modulus]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        for modulus in rows {
            let hash = modulus.hash_hex();
            if state.archived.contains_key(&hash) {
                continue;
            }
            if let Some(m) = state.live.remove(&hash) {
                state.archived.insert(hash, m);
            }
        }
        Ok(())
    }

    async fn count_by_size(&self) -> Result<HashMap<KeyLength, usize>, StoreError> {
        let state = self.state.lock();
        let mut out = HashMap::new();
        for modulus in state.live.values() {
            let kl = KeyLength::from_stored_size(modulus.size)?;
            *out.entry(kl).or_insert(0) += 1;
        }
        Ok(out)
    }

    async fn verify_schema(&self) -> Result<SchemaReport, StoreError> {
        Ok(SchemaReport {
            status: SchemaStatus::Passed,
            warnings: Vec::new(),
            errors: Vec::new(),
        })
    }

    async fn constants(&self, config_id: ConfigId) -> Result<Option<ModuliConstants>, StoreError> {
        Ok(self.state.lock().constants.get(&config_id).cloned())
    }
}

#[cfg(test)]
#[path = "memory_backend_tests.rs"]
mod tests;
