// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pipeline coordinator: orchestrates candidate generation, screening
//! with checkpoint/restart, and store-and-assemble.

pub mod checkpoint;
pub mod coordinator;
pub mod error;

pub use checkpoint::{discover_interrupted, InterruptedJob};
pub use coordinator::Coordinator;
pub use error::{PipelineError, TaskFailure};
