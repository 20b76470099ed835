// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for grabenv-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. grabenv.toml (cwd, optional)
//! 3. --config
//! 4. GRABENV_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GRABENV_GRAB__ARCH=x86                → grab.arch = "x86"
//! GRABENV_GRAB__NAME_PATTERN=Debug.*    → grab.name_pattern = "Debug.*"
//! GRABENV_GLOBAL__LOG_LEVEL=4           → global.log_level = 4
//! ```

pub mod loader;
pub mod types;


use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::cdt::ProjectLayout;
use crate::core::shell::Shell;
use crate::error::{ConfigError, Result};

pub use loader::ConfigLoader;
use types::{GlobalConfig, GrabConfig, ProjectConfig, ShellConfig};

/// Name of the optional configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "grabenv.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GRABENV";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Capture options.
    pub grab: GrabConfig,
    /// Shell selection.
    pub shell: ShellConfig,
    /// Project files.
    pub project: ProjectConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use grabenv_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("grabenv.toml")
    ///     .with_env_prefix("GRABENV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty architecture, an
    /// empty shell, or a name pattern that is not a valid regex.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.grab.arch.trim().is_empty() {
            return Err(invalid("grab", "arch", "architecture must not be empty").into());
        }
        if self.shell.fallback.trim().is_empty() {
            return Err(invalid("shell", "fallback", "fallback shell must not be empty").into());
        }
        self.name_regex()?;
        Ok(())
    }

    /// Compiles `grab.name_pattern` so that it must match a whole name.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the pattern does not compile.
    pub fn name_regex(&self) -> std::result::Result<Regex, ConfigError> {
        Regex::new(&format!("^(?:{})$", self.grab.name_pattern))
            .map_err(|e| invalid("grab", "name_pattern", &e.to_string()))
    }

    /// Shell described by the `[shell]` section, not yet resolved through `PATH`.
    #[must_use]
    pub fn shell(&self) -> Shell {
        Shell::from_env(
            &self.shell.selector,
            &self.shell.fallback,
            &self.shell.command_flag,
        )
        .with_encoding(self.shell.encoding)
    }

    /// File locations described by the `[project]` section.
    #[must_use]
    pub fn project_layout(&self) -> ProjectLayout {
        ProjectLayout::with_names(
            &self.project.root,
            &self.project.descriptor,
            &self.project.settings_dir,
            &self.project.prefs_file,
        )
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.log_level",
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("grab.arch", self.grab.arch.clone());
        options.insert("grab.vs_root", self.grab.vs_root.display().to_string());
        options.insert("grab.script", self.grab.script.display().to_string());
        options.insert("grab.name_pattern", self.grab.name_pattern.clone());
        options.insert("shell.selector", self.shell.selector.clone());
        options.insert("shell.fallback", self.shell.fallback.clone());
        options.insert("shell.command_flag", self.shell.command_flag.clone());
        options.insert("shell.encoding", self.shell.encoding.to_string());
        options.insert("project.root", self.project.root.display().to_string());
        options.insert(
            "project.descriptor",
            self.project.descriptor.display().to_string(),
        );
        options.insert(
            "project.settings_dir",
            self.project.settings_dir.display().to_string(),
        );
        options.insert(
            "project.prefs_file",
            self.project.prefs_file.display().to_string(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
