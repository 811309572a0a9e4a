// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The subprocess harness: launches `ssh-keygen`, validates its arguments,
//! streams its output, and reports a typed result.

pub mod error;
pub mod harness;
pub mod sshkeygen;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::SubprocessError;
pub use harness::{CompletedRun, Harness, HarnessArg, ProcessHarness};

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHarness;
