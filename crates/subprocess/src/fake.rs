// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`Harness`] for tests: production code never references
//! this module directly.

use crate::error::SubprocessError;
use crate::harness::{CompletedRun, Harness, HarnessArg};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

type Effect = Box<dyn Fn(&str, &[HarnessArg]) -> Result<(), SubprocessError> + Send + Sync>;

struct ScriptedCall {
    result: Result<CompletedRun, SubprocessError>,
    effect: Option<Effect>,
}

/// A recorded invocation, for assertions in tests that check the exact
/// command line a pipeline stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<HarnessArg>,
}

/// Scripted [`Harness`] double. Calls consume scripted responses in FIFO
/// order; a call with no scripted response left succeeds trivially with
/// exit code 0. Each scripted response may also carry a side effect (e.g.
/// writing the file `ssh-keygen` would have written) run before the result
/// is returned.
#[derive(Default)]
pub struct FakeHarness {
    script: Mutex<std::collections::VecDeque<ScriptedCall>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_success(&self) {
        self.script.lock().push_back(ScriptedCall {
            result: Ok(CompletedRun {
                exit_code: 0,
                duration: Duration::from_millis(1),
            }),
            effect: None,
        });
    }

    pub fn push_success_with_effect(
        &self,
        effect: impl Fn(&str, &[HarnessArg]) -> Result<(), SubprocessError> + Send + Sync + 'static,
    ) {
        self.script.lock().push_back(ScriptedCall {
            result: Ok(CompletedRun {
                exit_code: 0,
                duration: Duration::from_millis(1),
            }),
            effect: Some(Box::new(effect)),
        });
    }

    pub fn push_failure(&self, error: SubprocessError) {
        self.script.lock().push_back(ScriptedCall {
            result: Err(error),
            effect: None,
        });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Harness for FakeHarness {
    async fn run(&self, program: &str, args: &[HarnessArg]) -> Result<CompletedRun, SubprocessError> {
        self.calls.lock().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
        });

        let scripted = self.script.lock().pop_front();
        match scripted {
            Some(ScriptedCall { result, effect }) => {
                if let Some(effect) = effect {
                    effect(program, args)?;
                }
                result
            }
            None => Ok(CompletedRun {
                exit_code: 0,
                duration: Duration::from_millis(1),
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
