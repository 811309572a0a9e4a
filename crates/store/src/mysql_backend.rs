// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The production storage backend: a pooled MySQL/MariaDB connection,
//! content-addressed insert, and the balanced-retrieval/consume/verify
//! operations.

use crate::backend::{Counts, SchemaReport, SchemaStatus, StorageBackend};
use crate::error::StoreError;
use crate::schema::SchemaNames;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moduli_core::{CompactTimestamp, ConfigId, KeyLength, Modulus, ModuliConstants};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySqlPool, Row};
use std::collections::HashMap;
use tracing::{info, warn};

/// Rows are inserted in chunks this size; large enough to amortize
/// round-trips, small enough to keep a single transaction short-lived.
const INSERT_CHUNK_SIZE: usize = 200;

/// Default pooled-connection count when the caller doesn't override it.
const DEFAULT_POOL_SIZE: u32 = 10;

pub struct MySqlBackend {
    pool: MySqlPool,
    names: SchemaNames,
}

impl MySqlBackend {
    /// Connect with the default pool size.
    pub async fn connect(database_url: &str, names: SchemaNames) -> Result<Self, StoreError> {
        Self::connect_with_pool_size(database_url, names, DEFAULT_POOL_SIZE).await
    }

    pub async fn connect_with_pool_size(
        database_url: &str,
        names: SchemaNames,
        pool_size: u32,
    ) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(pool_size)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        Ok(Self { pool, names })
    }

    fn moduli_table(&self) -> String {
        self.names.qualified(&self.names.table_name)
    }

    fn archive_table(&self) -> String {
        self.names.qualified(&self.names.archive_name)
    }

    fn constants_table(&self) -> String {
        self.names.qualified(&self.names.constants_table)
    }
}

#[async_trait]
impl StorageBackend for MySqlBackend {
    async fn store(&self, rows: &[Modulus]) -> Result<Counts, StoreError> {
        let mut counts = Counts::default();
        let table = self.moduli_table();
        let archive = self.archive_table();

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

            for modulus in chunk {
                // A modulus already moved to the archive must not come back to
                // life here: skip the insert (counted as a duplicate) rather
                // than relying on `table`'s unique constraint alone, which
                // knows nothing about `archive`.
                let query = format!(
                    "INSERT INTO {table} (timestamp, config_id, size, modulus) \
                     SELECT ?, ?, ?, ? FROM DUAL \
                     WHERE NOT EXISTS (SELECT 1 FROM {archive} WHERE modulus = ?)"
                );
                let result = sqlx::query(&query)
                    .bind(modulus.timestamp.instant())
                    .bind(modulus.config_id)
                    .bind(modulus.size)
                    .bind(&modulus.modulus_hex)
                    .bind(&modulus.modulus_hex)
                    .execute(&mut *tx)
                    .await;

                match result {
                    Ok(result) if result.rows_affected() > 0 => counts.inserted += 1,
                    Ok(_) => counts.duplicates += 1,
                    Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                        counts.duplicates += 1;
                    }
                    Err(e) => return Err(StoreError::Database(e.to_string())),
                }
            }

            tx.commit()
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        info!(inserted = counts.inserted, duplicates = counts.duplicates, "store completed");
        Ok(counts)
    }

    async fn retrieve_balanced(
        &self,
        n_per_length: u32,
        key_lengths: &[KeyLength],
    ) -> Result<Vec<(Modulus, ModuliConstants)>, StoreError> {
        let table = self.moduli_table();
        let constants_table = self.constants_table();
        let mut out = Vec::new();

        for &kl in key_lengths {
            let query = format!(
                "SELECT m.timestamp, m.config_id, m.size, m.modulus, \
                 c.type, c.tests, c.trials, c.generator \
                 FROM {table} m JOIN {constants_table} c ON m.config_id = c.config_id \
                 WHERE m.size = ? ORDER BY RAND() LIMIT ?"
            );
            let rows = sqlx::query(&query)
                .bind(kl.stored_size())
                .bind(n_per_length)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

            if rows.len() < n_per_length as usize {
                return Err(StoreError::InsufficientRecords {
                    key_length: kl,
                    available: rows.len(),
                    requested: n_per_length,
                });
            }

            for row in rows {
                out.push(row_to_pair(&row)?);
            }
        }

        out.sort_by_key(|(modulus, _)| modulus.size);
        Ok(out)
    }

    async fn consume(&self, rows: &[Modulus]) -> Result<(), StoreError> {
        let table = self.moduli_table();
        let archive = self.archive_table();

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

            for modulus in chunk {
                let insert = format!(
                    "INSERT INTO {archive} (timestamp, config_id, size, modulus) VALUES (?, ?, ?, ?)"
                );
                let insert_result = sqlx::query(&insert)
                    .bind(modulus.timestamp.instant())
                    .bind(modulus.config_id)
                    .bind(modulus.size)
                    .bind(&modulus.modulus_hex)
                    .execute(&mut *tx)
                    .await;

                match insert_result {
                    Ok(_) => {}
                    Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                        // Already archived by a concurrent consumer: idempotent no-op.
                        warn!(hash = %modulus.hash_hex(), "modulus already archived, skipping");
                        continue;
                    }
                    Err(e) => return Err(StoreError::Database(e.to_string())),
                }

                let delete = format!("DELETE FROM {table} WHERE modulus = ?");
                sqlx::query(&delete)
                    .bind(&modulus.modulus_hex)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| StoreError::Database(e.to_string()))?;
            }

            tx.commit()
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        Ok(())
    }

    async fn count_by_size(&self) -> Result<HashMap<KeyLength, usize>, StoreError> {
        let table = self.moduli_table();
        let query = format!("SELECT size, COUNT(*) as n FROM {table} GROUP BY size");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut out = HashMap::new();
        for row in rows {
            let size: u32 = row.try_get("size").map_err(|e| StoreError::Database(e.to_string()))?;
            let n: i64 = row.try_get("n").map_err(|e| StoreError::Database(e.to_string()))?;
            let kl = KeyLength::from_stored_size(size)?;
            out.insert(kl, n as usize);
        }
        Ok(out)
    }

    async fn verify_schema(&self) -> Result<SchemaReport, StoreError> {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        let expected_tables = [
            self.names.table_name.clone(),
            self.names.archive_name.clone(),
            self.names.constants_table.clone(),
        ];
        for table in &expected_tables {
            let exists: Option<(i64,)> = sqlx::query_as(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = ? AND table_name = ?",
            )
            .bind(&self.names.db_name)
            .bind(table)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

            match exists {
                Some((count,)) if count > 0 => {}
                _ => errors.push(format!("table {table} is missing")),
            }
        }

        let view_exists: Option<(i64,)> = sqlx::query_as(
            "SELECT COUNT(*) FROM information_schema.views \
             WHERE table_schema = ? AND table_name = ?",
        )
        .bind(&self.names.db_name)
        .bind(&self.names.view_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        match view_exists {
            Some((count,)) if count > 0 => {}
            _ => warnings.push(format!("view {} is missing", self.names.view_name)),
        }

        let status = if !errors.is_empty() {
            SchemaStatus::Failed
        } else if !warnings.is_empty() {
            SchemaStatus::PassedWithWarnings
        } else {
            SchemaStatus::Passed
        };

        Ok(SchemaReport {
            status,
            warnings,
            errors,
        })
    }

    async fn constants(&self, config_id: ConfigId) -> Result<Option<ModuliConstants>, StoreError> {
        let table = self.constants_table();
        let query = format!(
            "SELECT config_id, type, tests, trials, generator FROM {table} WHERE config_id = ?"
        );
        let row = sqlx::query(&query)
            .bind(config_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let generator_type_str: String =
            row.try_get("type").map_err(|e| StoreError::Database(e.to_string()))?;
        let generator_type = generator_type_str
            .parse()
            .map_err(|e: String| StoreError::SchemaMismatch(e))?;

        Ok(Some(ModuliConstants {
            config_id: row.try_get("config_id").map_err(|e| StoreError::Database(e.to_string()))?,
            generator_type,
            tests: row.try_get("tests").map_err(|e| StoreError::Database(e.to_string()))?,
            trials: row.try_get("trials").map_err(|e| StoreError::Database(e.to_string()))?,
            generator: row.try_get("generator").map_err(|e| StoreError::Database(e.to_string()))?,
        }))
    }
}

fn row_to_pair(row: &sqlx::mysql::MySqlRow) -> Result<(Modulus, ModuliConstants), StoreError> {
    let timestamp: DateTime<Utc> = row.try_get("timestamp").map_err(|e| StoreError::Database(e.to_string()))?;
    let config_id: ConfigId = row.try_get("config_id").map_err(|e| StoreError::Database(e.to_string()))?;
    let size: u32 = row.try_get("size").map_err(|e| StoreError::Database(e.to_string()))?;
    let modulus_hex: String = row.try_get("modulus").map_err(|e| StoreError::Database(e.to_string()))?;
    let generator_type_str: String = row.try_get("type").map_err(|e| StoreError::Database(e.to_string()))?;
    let tests: u32 = row.try_get("tests").map_err(|e| StoreError::Database(e.to_string()))?;
    let trials: u32 = row.try_get("trials").map_err(|e| StoreError::Database(e.to_string()))?;
    let generator: u32 = row.try_get("generator").map_err(|e| StoreError::Database(e.to_string()))?;

    let modulus = Modulus::new(CompactTimestamp::new(timestamp), config_id, size, modulus_hex)?;
    let generator_type = generator_type_str
        .parse()
        .map_err(StoreError::SchemaMismatch)?;
    let constants = ModuliConstants {
        config_id,
        generator_type,
        tests,
        trials,
        generator,
    };
    Ok((modulus, constants))
}
