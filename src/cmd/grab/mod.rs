// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Grab command: capture, diff, discover, apply.
//!
//! ```text
//! run_grab(options, source, out)
//!   source.baseline()               --> EnvMap base
//!   source.vendor(script, arch)     --> EnvMap modified
//!   diff(base, modified)            --> [ChangeRecord]      (VERBOSE: dump)
//!   descriptor::discover(layout)    --> [ConfigurationRecord] (VERBOSE: id=name)
//!   for record where ^(?:pattern)$ matches record.name:
//!       VERBOSE: "Applying environment to <name>(<id>)"
//!       DRY_RUN: skip
//!       else     prefs::apply(layout, id, changes)
//!   --> GrabReport
//! ```


use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bitflags::bitflags;
use bon::Builder;
use regex::Regex;
use tracing::{debug, info};

use crate::cdt::{ConfigurationRecord, ProjectLayout, descriptor, prefs};
use crate::config::Config;
use crate::core::env::diff::{ChangeRecord, diff};
use crate::core::env::vcvars::EnvironmentSource;
use crate::error::Result;

bitflags! {
    /// Flags controlling a grab run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RunFlags: u8 {
        /// Compute and report, but never touch the preferences file.
        const DRY_RUN = 0x01;
        /// Print the change dump and the configurations to stdout.
        const VERBOSE = 0x02;
    }
}

/// Everything a grab run needs, resolved once from the configuration.
#[derive(Debug, Clone, Builder)]
pub struct GrabOptions {
    #[builder(setters(name = with_arch), into)]
    arch: String,
    #[builder(setters(name = with_script), into)]
    script: PathBuf,
    #[builder(setters(name = with_name_pattern))]
    name_pattern: Regex,
    #[builder(setters(name = with_layout))]
    layout: ProjectLayout,
    #[builder(setters(name = with_flags), default)]
    flags: RunFlags,
}

impl GrabOptions {
    /// Derives the options from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured name pattern does not compile.
    pub fn from_config(config: &Config, flags: RunFlags) -> Result<Self> {
        Ok(Self::builder()
            .with_arch(config.grab.arch.clone())
            .with_script(config.grab.script_path())
            .with_name_pattern(config.name_regex()?)
            .with_layout(config.project_layout())
            .with_flags(flags)
            .build())
    }

    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }

    #[must_use]
    pub const fn name_pattern(&self) -> &Regex {
        &self.name_pattern
    }

    #[must_use]
    pub const fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    #[must_use]
    pub const fn flags(&self) -> RunFlags {
        self.flags
    }
}

/// Outcome of a grab run.
#[derive(Debug, Clone, Default)]
pub struct GrabReport {
    /// Environment delta, in output order.
    pub changes: Vec<ChangeRecord>,
    /// Every configuration found in the descriptor.
    pub configurations: Vec<ConfigurationRecord>,
    /// Ids of the configurations whose name matched.
    pub selected: Vec<String>,
    /// Whether the preferences file was written.
    pub written: bool,
}

/// Runs the whole pipeline, writing verbose output to `out`.
///
/// # Errors
///
/// Returns an error if either capture fails, the descriptor cannot be read
/// or is ambiguous, the preferences file cannot be written, or `out` fails.
pub fn run_grab(
    options: &GrabOptions,
    source: &impl EnvironmentSource,
    out: &mut impl Write,
) -> Result<GrabReport> {
    let verbose = options.flags.contains(RunFlags::VERBOSE);
    let dry_run = options.flags.contains(RunFlags::DRY_RUN);

    let base = source
        .baseline()
        .context("failed to capture the baseline environment")?;
    let modified = source
        .vendor(&options.script, &options.arch)
        .with_context(|| {
            format!(
                "failed to capture the environment of '{}'",
                options.script.display()
            )
        })?;

    let changes = diff(&base, &modified);
    debug!(
        baseline = base.len(),
        modified = modified.len(),
        changes = changes.len(),
        "computed environment delta"
    );
    if verbose {
        for change in &changes {
            writeln!(out, "{change}")?;
        }
    }

    let configurations = descriptor::discover(&options.layout)?;
    if verbose {
        for record in &configurations {
            writeln!(out, "{}={}", record.id, record.name)?;
        }
    }

    let mut report = GrabReport {
        changes,
        configurations,
        ..GrabReport::default()
    };

    for record in &report.configurations {
        if !options.name_pattern.is_match(&record.name) {
            debug!(configuration = %record, "name does not match, skipping");
            continue;
        }

        if verbose {
            writeln!(out, "Applying environment to {record}")?;
        }
        report.selected.push(record.id.clone());

        if dry_run {
            info!(configuration = %record, "dry run, not writing preferences");
            continue;
        }

        prefs::apply(&options.layout, &record.id, &report.changes)?;
        report.written = true;
    }

    out.flush()?;
    Ok(report)
}
