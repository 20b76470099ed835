// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             GrabError (16 bytes)
//!                     |
//!   +---------+-------+-------+---------+
//!   |         |               |         |
//!   v         v               v         v
//! Config   Process        Descriptor    Fs
//!  Box       Box              Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Config      InvalidValue
//!   Process     ExecutableNotFound, SpawnFailed, OutputError, WaitFailed
//!   Descriptor  Read, Malformed, MissingAttribute, AmbiguousConfiguration
//!   Fs          IoError, InvalidConfigurationId
//!
//! All variants boxed => GrabError is a pointer plus discriminant.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GrabError`].
pub type GrabResult<T> = std::result::Result<T, GrabError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum GrabError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Project descriptor error.
    #[error("descriptor error: {0}")]
    Descriptor(#[from] Box<DescriptorError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GrabError {
                fn from(err: $error) -> Self {
                    GrabError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    DescriptorError => Descriptor,
    FsError => Fs,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {source}")]
    OutputError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to wait for process termination.
    #[error("failed to wait for process '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Descriptor Errors ---

/// Project descriptor (`.cproject`) errors.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Descriptor could not be read (missing or unreadable).
    #[error("failed to read project descriptor '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor is not well-formed XML.
    #[error("malformed project descriptor '{path}': {message}")]
    Malformed { path: String, message: String },

    /// A settings storage module lacks a required attribute.
    #[error("storage module '{name}' in '{path}' has no '{attribute}' attribute")]
    MissingAttribute {
        path: String,
        name: String,
        attribute: &'static str,
    },

    /// The same configuration id appears more than once.
    #[error("ambiguous id '{id}' for name '{name}' and '{previous_name}'")]
    AmbiguousConfiguration {
        id: String,
        name: String,
        previous_name: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration id is unusable as a preference key scope.
    #[error("invalid configuration id '{0}'")]
    InvalidConfigurationId(String),
}

impl FsError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}
