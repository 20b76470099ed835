// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment capture from a shell's `KEY=VALUE` output.
//!
//! ```text
//! capture(invocation)
//!   spawn --> stdout chunks --> LineDecoder --> parse_env_line
//!                                               last '=' splits
//!                                               no '=' -> skipped
//!   wait  --> exit code (reported, never an error)
//!   --> Capture { env: EnvMap, exit_code }
//! ```

use std::io::Read;

use tracing::{Level, debug, enabled, trace, warn};

use super::map::EnvMap;
use crate::core::shell::ShellInvocation;
use crate::error::{GrabResult, ProcessError};
use crate::utility::encoding::LineDecoder;

/// Result of running a shell and collecting its environment dump.
#[derive(Debug, Clone)]
pub struct Capture {
    env: EnvMap,
    exit_code: Option<i32>,
}

impl Capture {
    #[must_use]
    pub const fn env(&self) -> &EnvMap {
        &self.env
    }

    #[must_use]
    pub fn into_env(self) -> EnvMap {
        self.env
    }

    /// Exit code of the shell; `None` if it was terminated by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

/// Splits one output line into `(key, value)` at its last `=`.
///
/// Returns `None` for lines without any `=`.
#[must_use]
pub fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    line.rsplit_once('=')
}

/// Parses a complete `KEY=VALUE` dump into an [`EnvMap`].
#[must_use]
pub fn parse_env_output(output: &str) -> EnvMap {
    output.lines().filter_map(parse_env_line).collect()
}

/// Runs `invocation` and captures the environment it prints.
///
/// Stdout is read to completion one line at a time, then the process is
/// waited for. A non-zero exit code is logged but the captured map is kept.
///
/// # Errors
///
/// Returns a `ProcessError` if the shell cannot be spawned, its output
/// cannot be read, or waiting for it fails.
pub fn capture(invocation: &ShellInvocation) -> GrabResult<Capture> {
    let name = invocation.display_name();
    let command_line = invocation.command_line();
    debug!(cmd = %command_line, "exec");

    let mut child = invocation
        .build_command()
        .spawn()
        .map_err(|source| ProcessError::SpawnFailed {
            command: command_line.clone(),
            source,
        })?;
    trace!(process = %name, pid = child.id(), "spawned");

    let mut env = EnvMap::new();
    let mut decoder = LineDecoder::new(invocation.shell().encoding());

    if let Some(mut stdout) = child.stdout.take() {
        let mut buf = [0u8; 4096];
        loop {
            let read = match stdout.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    // reap the child before bailing out
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::OutputError {
                        command: command_line,
                        source,
                    }
                    .into());
                }
            };
            for line in decoder.push(&buf[..read]) {
                record_line(&mut env, &name, &line);
            }
        }
    }
    if let Some(line) = decoder.finish() {
        record_line(&mut env, &name, &line);
    }

    let status = child.wait().map_err(|source| ProcessError::WaitFailed {
        command: command_line.clone(),
        source,
    })?;

    let exit_code = status.code();
    if exit_code != Some(0) {
        warn!(process = %name, exit_code = ?exit_code, cmd = %command_line, "shell exited unsuccessfully, keeping captured environment");
    }

    debug!(process = %name, count = env.len(), "captured environment variables");
    Ok(Capture { env, exit_code })
}

fn record_line(env: &mut EnvMap, process: &str, line: &str) {
    match parse_env_line(line) {
        Some((key, value)) => {
            if enabled!(Level::TRACE) {
                trace!(process, key, value, "captured env var");
            }
            env.insert(key, value);
        }
        None => trace!(process, line, "skipped output line"),
    }
}
