// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for grabenv-rs using clap derive.
//!
//! # Option Precedence
//!
//! ```text
//! grabenv [options]
//!   --arch ARCH            grab.arch
//!   --vsRoot DIR           grab.vs_root
//!   --projectRoot DIR      project.root
//!   --namePattern REGEX    grab.name_pattern
//!   -l, --log-level N      global.log_level
//!   --log-file FILE        global.log_file
//!   --config FILE          extra TOML layer
//!   -n, --dry-run          RunFlags::DRY_RUN
//!   -v, --verbose          RunFlags::VERBOSE
//!   -h, -?, --help
//!
//! Precedence: CLI flags > GRABENV_* > --config > grabenv.toml > defaults
//! ```
//!
//! # Exit Codes
//!
//! ```text
//! help / version     0   help text on stdout
//! bad option         1   message + help on stdout
//! ```

#[cfg(test)]
mod tests;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

use crate::cmd::grab::RunFlags;

/// Apply environment to Eclipse CDT configurations.
///
/// Captures the environment of a plain shell and of a shell that ran the
/// Visual Studio `vcvarsall.bat`, then appends the difference to every
/// matching configuration of the project's `.settings/org.eclipse.cdt.core.prefs`.
#[derive(Debug, Parser)]
#[command(
    name = "grabenv",
    version,
    about = "Apply environment to Eclipse CDT configurations",
    disable_help_flag = true,
    arg = clap::Arg::new("help")
        .short('h')
        .long("help")
        .short_alias('?')
        .action(ArgAction::Help)
        .help("Print help"),
    after_help = "CONFIG FILES:\n\n\
                  grabenv reads `grabenv.toml` from the current directory if it\n\
                  exists, then the file given with --config. Any key can also be\n\
                  set through GRABENV_<SECTION>__<KEY> environment variables, for\n\
                  example GRABENV_GRAB__ARCH=x86. Command-line flags win over all\n\
                  of them."
)]
pub struct Cli {
    /// Target architecture passed to vcvarsall.bat [default: x64]
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Visual Studio installation root
    #[arg(long = "vsRoot", visible_alias = "vs-root", value_name = "DIR")]
    pub vs_root: Option<PathBuf>,

    /// Eclipse project root containing .cproject [default: .]
    #[arg(long = "projectRoot", visible_alias = "project-root", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Regex a configuration name must match in full [default: .+]
    #[arg(long = "namePattern", visible_alias = "name-pattern", value_name = "REGEX")]
    pub name_pattern: Option<String>,

    /// Show what would be written without touching any file
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Print the environment changes and discovered configurations
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Additional TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace)
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub log_level: Option<u8>,

    /// Path to log file
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides: Vec<(&'static str, config::Value)> = Vec::new();

        if let Some(ref arch) = self.arch {
            overrides.push(("grab.arch", arch.clone().into()));
        }
        if let Some(ref root) = self.vs_root {
            overrides.push(("grab.vs_root", root.display().to_string().into()));
        }
        if let Some(ref pattern) = self.name_pattern {
            overrides.push(("grab.name_pattern", pattern.clone().into()));
        }
        if let Some(ref root) = self.project_root {
            overrides.push(("project.root", root.display().to_string().into()));
        }
        if let Some(level) = self.log_level {
            overrides.push(("global.log_level", i64::from(level).into()));
        }
        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string().into()));
        }

        overrides
    }

    /// Run behavior selected by `--dry-run` and `--verbose`.
    #[must_use]
    pub fn run_flags(&self) -> RunFlags {
        let mut flags = RunFlags::empty();
        flags.set(RunFlags::DRY_RUN, self.dry_run);
        flags.set(RunFlags::VERBOSE, self.verbose);
        flags
    }
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Same as [`try_parse`].
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

/// Process exit code for a parse failure: 0 for help/version, 1 otherwise.
#[must_use]
pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Text printed to stdout for a parse failure.
///
/// Help and version requests render as-is. Real errors keep clap's first line
/// and are followed by the full help.
#[must_use]
pub fn parse_error_output(err: &clap::Error) -> String {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.to_string(),
        _ => {
            let rendered = err.to_string();
            let message = rendered.lines().next().unwrap_or_default();
            format!("{message}\n\n{}", Cli::command().render_help())
        }
    }
}
