// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pipeline coordinator: fans out generate/screen jobs across a
//! bounded worker pool, honors the strict P1→P2 barrier, and hands
//! screened results to the store for assembly.

use crate::checkpoint::discover_interrupted;
use crate::error::{PipelineError, TaskFailure};
use moduli_codec::{parse_moduli_file, write_moduli_file, ModuliFileHeader};
use moduli_core::filenames::{candidates_path, moduli_path, output_path, sidecar_path};
use moduli_core::{Clock, CompactTimestamp, Config, KeyLength, Modulus, NiceValue};
use moduli_store::StorageBackend;
use moduli_subprocess::{sshkeygen, Harness};
use regex::Regex;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// One candidate file produced in P1, carrying the key length and
/// timestamp it shares with its eventual screened output.
#[derive(Debug, Clone)]
struct CandidateFile {
    key_length: KeyLength,
    timestamp: CompactTimestamp,
    path: PathBuf,
}

/// Worker-pool size: OS-level parallelism, capped to the number of tasks
/// so a short key-length list doesn't oversubscribe idle threads.
fn pool_size(task_count: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    task_count.min(cores).max(1)
}

fn moduli_filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"^moduli_(\d+)_(\d+)$") {
        Ok(re) => re,
        Err(_) => unreachable!("moduli filename pattern is a fixed, known-good literal"),
    })
}

pub struct Coordinator<C: Clock> {
    harness: Arc<dyn Harness>,
    store: Arc<dyn StorageBackend>,
    config: Config,
    clock: C,
}

impl<C: Clock> Coordinator<C> {
    pub fn new(harness: Arc<dyn Harness>, store: Arc<dyn StorageBackend>, config: Config, clock: C) -> Self {
        Self {
            harness,
            store,
            config,
            clock,
        }
    }

    /// P1 + P2: generate candidates for each key length, then (strict
    /// barrier) screen every candidate file produced. Returns the screened
    /// moduli file paths.
    pub async fn generate_moduli(
        &self,
        key_lengths: &[KeyLength],
        nice: NiceValue,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        if key_lengths.is_empty() {
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(&self.config.candidates_dir).map_err(|source| PipelineError::Io {
            path: self.config.candidates_dir.display().to_string(),
            source,
        })?;
        std::fs::create_dir_all(&self.config.moduli_dir).map_err(|source| PipelineError::Io {
            path: self.config.moduli_dir.display().to_string(),
            source,
        })?;

        let candidates = self.generate_phase(key_lengths, nice).await?;
        self.screen_phase(candidates, nice).await
    }

    async fn generate_phase(
        &self,
        key_lengths: &[KeyLength],
        nice: NiceValue,
    ) -> Result<Vec<CandidateFile>, PipelineError> {
        let semaphore = Arc::new(Semaphore::new(pool_size(key_lengths.len())));
        let mut tasks = JoinSet::new();

        for &key_length in key_lengths {
            let harness = Arc::clone(&self.harness);
            let semaphore = Arc::clone(&semaphore);
            let timestamp = CompactTimestamp::new(self.clock.now());
            let path = candidates_path(&self.config.candidates_dir, key_length, timestamp);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => unreachable!("semaphore is never closed"),
                };
                let result = sshkeygen::generate(harness.as_ref(), key_length, nice, &path).await;
                (key_length, timestamp, path, result)
            });
        }

        let mut ok = Vec::new();
        let mut failures = Vec::new();
        let total = key_lengths.len();

        while let Some(joined) = tasks.join_next().await {
            let (key_length, timestamp, path, result) = joined.map_err(|e| PipelineError::Io {
                path: "<generate task>".to_string(),
                source: std::io::Error::other(e),
            })?;
            match result {
                Ok(_) => {
                    info!(%key_length, path = %path.display(), "generation completed");
                    ok.push(CandidateFile {
                        key_length,
                        timestamp,
                        path,
                    });
                }
                Err(source) => {
                    warn!(%key_length, error = %source, "generation failed");
                    failures.push(TaskFailure { key_length, source });
                }
            }
        }

        if !failures.is_empty() {
            return Err(PipelineError::PartialFailure {
                failed: failures.len(),
                total,
                errors: failures,
            });
        }
        Ok(ok)
    }

    async fn screen_phase(
        &self,
        candidates: Vec<CandidateFile>,
        nice: NiceValue,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let semaphore = Arc::new(Semaphore::new(pool_size(candidates.len())));
        let mut tasks = JoinSet::new();
        let total = candidates.len();

        for candidate in candidates {
            let harness = Arc::clone(&self.harness);
            let semaphore = Arc::clone(&semaphore);
            let out_path = moduli_path(&self.config.moduli_dir, candidate.key_length, candidate.timestamp);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => unreachable!("semaphore is never closed"),
                };
                let result = sshkeygen::screen(harness.as_ref(), nice, &candidate.path, &out_path).await;
                (candidate, out_path, result)
            });
        }

        let mut ok = Vec::new();
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            let (candidate, out_path, result) = joined.map_err(|e| PipelineError::Io {
                path: "<screen task>".to_string(),
                source: std::io::Error::other(e),
            })?;
            match result {
                Ok(_) => {
                    info!(key_length = %candidate.key_length, path = %out_path.display(), "screening completed");
                    let _ = std::fs::remove_file(&candidate.path);
                    if let Some(sidecar) = sidecar_path(&candidate.path) {
                        let _ = std::fs::remove_file(sidecar);
                    }
                    ok.push(out_path);
                }
                Err(source) => {
                    warn!(key_length = %candidate.key_length, error = %source, "screening failed, leaving candidate for restart");
                    failures.push(TaskFailure {
                        key_length: candidate.key_length,
                        source,
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(PipelineError::PartialFailure {
                failed: failures.len(),
                total,
                errors: failures,
            });
        }
        Ok(ok)
    }

    /// Discover sidecars left by an interrupted screening run and resume
    /// each one. `ssh-keygen` itself consumes its sidecar and resumes at
    /// the recorded line; the core only rebuilds the command line.
    pub async fn restart_screening(&self, nice: NiceValue) -> Result<Vec<PathBuf>, PipelineError> {
        let jobs = discover_interrupted(&self.config.candidates_dir)?;
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let semaphore = Arc::new(Semaphore::new(pool_size(jobs.len())));
        let mut tasks = JoinSet::new();
        let total = jobs.len();

        for job in jobs {
            let harness = Arc::clone(&self.harness);
            let semaphore = Arc::clone(&semaphore);
            let out_path = moduli_path(&self.config.moduli_dir, job.sidecar.key_length, job.sidecar.timestamp);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => unreachable!("semaphore is never closed"),
                };
                let result = sshkeygen::screen(harness.as_ref(), nice, &job.candidates_path, &out_path).await;
                (job, out_path, result)
            });
        }

        let mut ok = Vec::new();
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            let (job, out_path, result) = joined.map_err(|e| PipelineError::Io {
                path: "<restart task>".to_string(),
                source: std::io::Error::other(e),
            })?;
            match result {
                Ok(_) => {
                    let _ = std::fs::remove_file(&job.candidates_path);
                    let _ = std::fs::remove_file(&job.sidecar_path);
                    ok.push(out_path);
                }
                Err(source) => {
                    warn!(error = %source, "restart screening failed, leaving candidate and sidecar");
                    failures.push(TaskFailure {
                        key_length: job.sidecar.key_length,
                        source,
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(PipelineError::PartialFailure {
                failed: failures.len(),
                total,
                errors: failures,
            });
        }
        Ok(ok)
    }

    /// P3: parse every screened file in the moduli directory, store its
    /// rows, then assemble a balanced output file. If `consume` is set,
    /// the rows used for assembly are archived after the file is written.
    pub async fn store_and_assemble(
        &self,
        header: ModuliFileHeader,
        records_per_length: u32,
        key_lengths: &[KeyLength],
        consume: bool,
    ) -> Result<PathBuf, PipelineError> {
        self.store_screened_files().await?;

        let rows = self
            .store
            .retrieve_balanced(records_per_length, key_lengths)
            .await?;

        let out_path = output_path(&self.config.moduli_home, CompactTimestamp::new(self.clock.now()));
        write_moduli_file(&out_path, &header, &rows)?;

        if consume {
            let moduli: Vec<Modulus> = rows.into_iter().map(|(m, _)| m).collect();
            self.store.consume(&moduli).await?;
        }

        Ok(out_path)
    }

    /// Parse and store every `moduli_<k>_<T>` file found directly under
    /// the moduli directory, deleting each on success unless the
    /// configuration asks to preserve it.
    async fn store_screened_files(&self) -> Result<(), PipelineError> {
        let entries = match std::fs::read_dir(&self.config.moduli_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(PipelineError::Io {
                    path: self.config.moduli_dir.display().to_string(),
                    source,
                })
            }
        };

        for entry in entries {
            let entry = entry.map_err(|source| PipelineError::Io {
                path: self.config.moduli_dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !moduli_filename_pattern().is_match(file_name) {
                continue;
            }

            let parsed: Vec<_> = parse_moduli_file(&path)?.collect();
            let rows: Vec<Modulus> = parsed
                .into_iter()
                .filter_map(|line| line.into_modulus(1).ok())
                .collect();

            let counts = self.store.store(&rows).await?;
            info!(
                path = %path.display(),
                inserted = counts.inserted,
                duplicates = counts.duplicates,
                "stored screened file"
            );

            if !self.config.preserve_moduli_after_dbstore {
                let _ = std::fs::remove_file(&path);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
