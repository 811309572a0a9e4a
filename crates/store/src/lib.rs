// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable moduli store: content-addressed at-most-once insertion,
//! balanced retrieval, and archive-on-consume.

pub mod backend;
pub mod error;
pub mod mysql_backend;
pub mod schema;

#[cfg(any(test, feature = "test-support"))]
pub mod memory_backend;

pub use backend::{Counts, SchemaReport, SchemaStatus, StorageBackend};
pub use error::StoreError;
pub use mysql_backend::MySqlBackend;
pub use schema::SchemaNames;

#[cfg(any(test, feature = "test-support"))]
pub use memory_backend::MemoryBackend;
