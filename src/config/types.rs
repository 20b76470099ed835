// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config
//!   global   log_level, log_file
//!   grab     arch, vs_root, script, name_pattern
//!   shell    selector, fallback, command_flag, encoding
//!   project  root, descriptor, settings_dir, prefs_file
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cdt::{DESCRIPTOR_FILE, PREFS_FILE, SETTINGS_DIR};
use crate::logging::LogLevel;
use crate::utility::encoding::Encoding;

/// Default Visual Studio installation root.
pub const DEFAULT_VS_ROOT: &str = r"C:\Program Files (x86)\Microsoft Visual Studio\2017\Community";

/// Default vendor script, relative to the installation root.
pub const DEFAULT_SCRIPT: &str = r"VC\Auxiliary\Build\vcvarsall.bat";

/// Default target architecture passed to the vendor script.
pub const DEFAULT_ARCH: &str = "x64";

/// Default configuration name filter (any non-empty name).
pub const DEFAULT_NAME_PATTERN: &str = ".+";

/// Global configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-5).
    pub log_level: LogLevel,
    /// Optional log file, written at trace level.
    pub log_file: Option<PathBuf>,
}

/// What to capture and which configurations to touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrabConfig {
    /// Architecture argument for the vendor script.
    pub arch: String,
    /// Visual Studio installation root.
    pub vs_root: PathBuf,
    /// Vendor script; relative paths are resolved against `vs_root`.
    pub script: PathBuf,
    /// Regex a configuration name must match in full.
    pub name_pattern: String,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            arch: DEFAULT_ARCH.to_string(),
            vs_root: PathBuf::from(DEFAULT_VS_ROOT),
            script: PathBuf::from(DEFAULT_SCRIPT),
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
        }
    }
}

impl GrabConfig {
    /// Full path of the vendor script.
    #[must_use]
    pub fn script_path(&self) -> PathBuf {
        if self.script.is_absolute() {
            self.script.clone()
        } else {
            self.vs_root.join(&self.script)
        }
    }
}

/// Command interpreter used for both captures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Environment variable naming the shell.
    pub selector: String,
    /// Shell used when the selector variable is unset.
    pub fallback: String,
    /// Flag that makes the shell run one command and exit.
    pub command_flag: String,
    /// Encoding of the shell's output.
    pub encoding: Encoding,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            selector: "ComSpec".to_string(),
            fallback: "cmd.exe".to_string(),
            command_flag: "/c".to_string(),
            encoding: Encoding::default(),
        }
    }
}

/// Eclipse CDT project location and file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub descriptor: PathBuf,
    pub settings_dir: PathBuf,
    pub prefs_file: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            descriptor: PathBuf::from(DESCRIPTOR_FILE),
            settings_dir: PathBuf::from(SETTINGS_DIR),
            prefs_file: PathBuf::from(PREFS_FILE),
        }
    }
}
