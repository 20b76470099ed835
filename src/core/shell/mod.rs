// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shell selection and single-command invocations.
//!
//! ```text
//! Shell::from_env("ComSpec", "cmd.exe", "/c")
//!   .with_encoding(Acp)
//!   .resolve()?                   bare name --> which::which
//!   .invocation("\"set\"")
//!       --> ShellInvocation
//!           cmd.exe /c "set"      (Windows: raw_arg, no re-quoting)
//!           stdin null, stdout piped, stderr inherited
//! ```

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::ProcessError;
use crate::utility::encoding::Encoding;

/// A command interpreter that can run one command string per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: PathBuf,
    command_flag: String,
    encoding: Encoding,
}

impl Shell {
    pub fn new(program: impl AsRef<Path>, command_flag: impl Into<String>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            command_flag: command_flag.into(),
            encoding: Encoding::default(),
        }
    }

    /// Picks the shell named by the `selector` environment variable.
    ///
    /// Falls back to `fallback` when the variable is unset or empty.
    #[must_use]
    pub fn from_env(selector: &str, fallback: &str, command_flag: &str) -> Self {
        let program = std::env::var_os(selector)
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(fallback), PathBuf::from);

        trace!(selector, program = %program.display(), "selected shell");
        Self::new(program, command_flag)
    }

    /// Sets the encoding the shell writes its output in.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Resolves a bare program name through `PATH`.
    ///
    /// Programs given with a directory component are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if a bare name is not in `PATH`.
    pub fn resolve(mut self) -> Result<Self, ProcessError> {
        let is_bare = self
            .program
            .parent()
            .is_none_or(|parent| parent.as_os_str().is_empty());
        if !is_bare {
            return Ok(self);
        }

        let name = self.program.to_string_lossy().into_owned();
        self.program = which::which(&self.program)
            .map_err(|_| ProcessError::ExecutableNotFound { name })?;
        Ok(self)
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    #[must_use]
    pub fn command_flag(&self) -> &str {
        &self.command_flag
    }

    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Prepares an invocation running `command` in this shell.
    #[must_use]
    pub fn invocation(&self, command: impl Into<String>) -> ShellInvocation {
        ShellInvocation {
            shell: self.clone(),
            command: command.into(),
        }
    }
}

/// One `<shell> <flag> <command>` execution.
#[derive(Debug, Clone)]
pub struct ShellInvocation {
    shell: Shell,
    command: String,
}

impl ShellInvocation {
    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the display name for this invocation.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.shell.program.file_stem().map_or_else(
            || "shell".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        format!(
            "{} {} {}",
            self.shell.program.display(),
            self.shell.command_flag,
            self.command
        )
    }

    /// Builds the std `Command` for this invocation.
    pub(crate) fn build_command(&self) -> Command {
        let mut command = Command::new(&self.shell.program);
        command.arg(&self.shell.command_flag);

        // cmd.exe does its own quote parsing; the string must reach it unchanged
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.raw_arg(&self.command);
        }
        #[cfg(not(windows))]
        {
            command.arg(&self.command);
        }

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        command
    }
}
