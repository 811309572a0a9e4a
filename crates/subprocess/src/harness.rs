// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess launch, validation, and concurrent line streaming.

use crate::error::SubprocessError;
use async_trait::async_trait;
use moduli_core::validation::validate_argument;
use moduli_core::{KeyLength, NiceValue};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// One positional argument to a harness invocation, tagged with the shape
/// it must validate against before the process is ever spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessArg {
    KeyLength(u32),
    NiceValue(i32),
    Str(String),
}

impl HarnessArg {
    fn validate_and_render(&self) -> Result<String, SubprocessError> {
        match self {
            HarnessArg::KeyLength(bits) => {
                let kl = KeyLength::new(*bits)?;
                Ok(kl.bits().to_string())
            }
            HarnessArg::NiceValue(value) => {
                let nv = NiceValue::new(*value)?;
                Ok(nv.value().to_string())
            }
            HarnessArg::Str(s) => {
                validate_argument(s)?;
                Ok(s.clone())
            }
        }
    }
}

impl From<&str> for HarnessArg {
    fn from(s: &str) -> Self {
        HarnessArg::Str(s.to_string())
    }
}

impl From<String> for HarnessArg {
    fn from(s: String) -> Self {
        HarnessArg::Str(s)
    }
}

/// The result of a successful invocation: the harness only ever returns
/// `Ok` for a zero exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedRun {
    pub exit_code: i32,
    pub duration: Duration,
}

/// Launches a validated command, streams its output, and reports its
/// outcome. Implemented for production by [`ProcessHarness`]; tests
/// substitute a fake (see the `test-support` feature).
#[async_trait]
pub trait Harness: Send + Sync {
    async fn run(&self, program: &str, args: &[HarnessArg]) -> Result<CompletedRun, SubprocessError>;
}

/// Production harness: spawns a real child process and streams its stdout
/// and stderr concurrently, each forwarded to the logger line-by-line.
/// Neither stream is buffered in full; memory usage is bounded by the
/// longest single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHarness;

impl ProcessHarness {
    pub fn new() -> Self {
        Self
    }

    async fn stream_lines(
        child: &mut Child,
        program: &str,
    ) -> Result<(), SubprocessError> {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let program_out = program.to_string();
        let stdout_task = tokio::spawn(async move {
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => info!(program = %program_out, "{line}"),
                        Ok(None) => break,
                        Err(e) => {
                            return Err(SubprocessError::StreamError {
                                program: program_out,
                                stream: "stdout",
                                source: e,
                            })
                        }
                    }
                }
            }
            Ok(())
        });

        let program_err = program.to_string();
        let stderr_task = tokio::spawn(async move {
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => debug!(program = %program_err, "{line}"),
                        Ok(None) => break,
                        Err(e) => {
                            return Err(SubprocessError::StreamError {
                                program: program_err,
                                stream: "stderr",
                                source: e,
                            })
                        }
                    }
                }
            }
            Ok(())
        });

        let (stdout_result, stderr_result) = tokio::join!(stdout_task, stderr_task);
        // A panic inside the spawned task is not a contract this harness
        // models; surface it as a stream error rather than propagating the
        // join error's panic payload.
        stdout_result.unwrap_or(Ok(()))?;
        stderr_result.unwrap_or(Ok(()))?;
        Ok(())
    }
}

#[async_trait]
impl Harness for ProcessHarness {
    async fn run(&self, program: &str, args: &[HarnessArg]) -> Result<CompletedRun, SubprocessError> {
        let rendered: Result<Vec<String>, SubprocessError> =
            args.iter().map(HarnessArg::validate_and_render).collect();
        let rendered = rendered?;

        let span = tracing::info_span!("subprocess", program = %program);
        let _guard = span.enter();
        info!(args = ?rendered, "spawning");

        let start = Instant::now();
        let mut child = Command::new(program)
            .args(&rendered)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|source| SubprocessError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        Self::stream_lines(&mut child, program).await?;

        let status = child
            .wait()
            .await
            .map_err(|source| SubprocessError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;
        let duration = start.elapsed();

        match status.code() {
            Some(0) => {
                info!(elapsed_ms = duration.as_millis() as u64, "completed");
                Ok(CompletedRun {
                    exit_code: 0,
                    duration,
                })
            }
            Some(code) => {
                tracing::error!(code, "subprocess failed");
                Err(SubprocessError::SubprocessFailed {
                    program: program.to_string(),
                    code,
                })
            }
            None => {
                tracing::error!("subprocess terminated by signal");
                Err(SubprocessError::SignalTerminated {
                    program: program.to_string(),
                })
            }
        }
    }
}

/// Validate a SQL identifier read from configuration. Re-exported here so
/// callers that only depend on this crate for subprocess work don't also
/// need a direct `moduli-core` dependency for this one check.
pub fn validate_sql_identifier(value: &str) -> Result<(), moduli_core::ValidationError> {
    moduli_core::validation::validate_sql_identifier(value)
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
