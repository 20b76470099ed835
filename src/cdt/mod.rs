// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Eclipse CDT project files.
//!
//! ```text
//! <project root>/
//!   .cproject                          descriptor::discover()
//!     storageModule[moduleId=org.eclipse.cdt.core.settings][@name]
//!       --> ConfigurationRecord { id, name }
//!   .settings/
//!     org.eclipse.cdt.core.prefs       prefs::apply()
//!       environment/project/<id>/<KEY>/{delimiter,operation,value}
//! ```

pub mod descriptor;
pub mod prefs;


use std::fmt;
use std::path::{Path, PathBuf};

/// Default descriptor file name.
pub const DESCRIPTOR_FILE: &str = ".cproject";

/// Default settings directory name.
pub const SETTINGS_DIR: &str = ".settings";

/// Default preferences file name.
pub const PREFS_FILE: &str = "org.eclipse.cdt.core.prefs";

/// A named CDT build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub id: String,
    pub name: String,
}

impl fmt::Display for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}

/// Locations of the CDT files inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    descriptor: PathBuf,
    settings_dir: PathBuf,
    prefs_file: PathBuf,
}

impl ProjectLayout {
    /// Layout with the standard Eclipse file names.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_names(root, DESCRIPTOR_FILE, SETTINGS_DIR, PREFS_FILE)
    }

    /// Layout with custom names, each relative to the project root.
    pub fn with_names(
        root: impl AsRef<Path>,
        descriptor: impl AsRef<Path>,
        settings_dir: impl AsRef<Path>,
        prefs_file: impl AsRef<Path>,
    ) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            descriptor: descriptor.as_ref().to_path_buf(),
            settings_dir: settings_dir.as_ref().to_path_buf(),
            prefs_file: prefs_file.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the `.cproject` descriptor.
    #[must_use]
    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(&self.descriptor)
    }

    /// Path of the `.settings` directory.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.root.join(&self.settings_dir)
    }

    /// Path of the CDT core preferences file.
    #[must_use]
    pub fn prefs_path(&self) -> PathBuf {
        self.settings_path().join(&self.prefs_file)
    }
}
