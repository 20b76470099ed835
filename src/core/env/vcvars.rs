// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Baseline and Visual Studio environment sources.
//!
//! ```text
//! EnvironmentSource
//!   baseline()             --> cmd.exe /c "set"
//!   vendor(script, arch)   --> cmd.exe /c ""<vcvarsall.bat>" <arch> & set"
//!
//! ShellSource     production, runs the shell twice in sequence
//! ```

use std::path::Path;

use tracing::{debug, warn};

use super::capture::capture;
use super::map::EnvMap;
use crate::core::shell::Shell;
use crate::error::GrabResult;

/// Command that dumps the shell's environment.
pub const DUMP_COMMAND: &str = "set";

/// Provider of the two environments that get diffed.
pub trait EnvironmentSource {
    /// Environment of a plain shell session.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be captured.
    fn baseline(&self) -> GrabResult<EnvMap>;

    /// Environment after sourcing the vendor `script` with `arch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be captured.
    fn vendor(&self, script: &Path, arch: &str) -> GrabResult<EnvMap>;
}

/// Builds the baseline command string: `"set"`.
#[must_use]
pub fn baseline_command() -> String {
    format!("\"{DUMP_COMMAND}\"")
}

/// Builds the vendor command string: `""<script>" <arch> & set"`.
///
/// The outer quotes follow `cmd.exe /c` rules: the first and last quote are
/// stripped and the remainder runs as typed.
#[must_use]
pub fn vendor_command(script: &Path, arch: &str) -> String {
    format!("\"\"{}\" {arch} & {DUMP_COMMAND}\"", script.display())
}

/// Captures environments by running a real shell.
#[derive(Debug, Clone)]
pub struct ShellSource {
    shell: Shell,
}

impl ShellSource {
    #[must_use]
    pub const fn new(shell: Shell) -> Self {
        Self { shell }
    }

    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }
}

impl EnvironmentSource for ShellSource {
    fn baseline(&self) -> GrabResult<EnvMap> {
        debug!("capturing baseline environment");
        let capture = capture(&self.shell.invocation(baseline_command()))?;
        Ok(capture.into_env())
    }

    fn vendor(&self, script: &Path, arch: &str) -> GrabResult<EnvMap> {
        debug!(script = %script.display(), arch, "capturing vendor environment");
        if !script.exists() {
            warn!(script = %script.display(), "vendor script not found, the shell will report the failure");
        }
        let capture = capture(&self.shell.invocation(vendor_command(script, arch)))?;
        Ok(capture.into_env())
    }
}
