// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Appending environment entries to `org.eclipse.cdt.core.prefs`.
//!
//! ```text
//! apply(layout, id, changes)
//!   mkdir .settings
//!   create_new --> header "eclipse.preferences.version=1"
//!   exists     --> append
//!   per change (Remove skipped):
//!     environment/project/<id>/<KEY>/delimiter=;
//!     environment/project/<id>/<KEY>/operation=append
//!     environment/project/<id>/<KEY>/value=<escaped>
//! ```
//!
//! Entries are never merged: running twice appends everything twice.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use super::ProjectLayout;
use crate::core::env::diff::ChangeRecord;
use crate::error::{FsError, GrabResult};

/// First line of a freshly created preferences file.
pub const PREFS_HEADER: &str = "eclipse.preferences.version=1";

/// Line terminator used by Eclipse on this platform.
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Escapes a value for the preferences format (`\` and `:` get a `\` prefix).
#[must_use]
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders the three preference lines for one change, or `None` for `Remove`.
#[must_use]
pub fn format_change(configuration_id: &str, change: &ChangeRecord) -> Option<[String; 3]> {
    let value = change.value()?;
    let scope = format!(
        "environment/project/{configuration_id}/{}",
        change.key().to_uppercase()
    );

    Some([
        format!("{scope}/delimiter=;"),
        format!("{scope}/operation=append"),
        format!("{scope}/value={}", escape_value(value)),
    ])
}

/// Appends `changes` for one configuration to the project's preferences file.
///
/// # Errors
///
/// Returns a `FsError` if the configuration id is empty or if creating the
/// settings directory, opening or writing the preferences file fails.
pub fn apply(
    layout: &ProjectLayout,
    configuration_id: &str,
    changes: &[ChangeRecord],
) -> GrabResult<()> {
    if configuration_id.is_empty() {
        return Err(FsError::InvalidConfigurationId(configuration_id.to_owned()).into());
    }

    let settings = layout.settings_path();
    std::fs::create_dir_all(&settings).map_err(|e| FsError::io(&settings, e))?;

    let path = layout.prefs_path();
    let (file, created) = open_prefs(&path)?;
    let mut out = BufWriter::new(file);

    if created {
        debug!(prefs = %path.display(), "created preferences file");
        write_line(&mut out, &path, PREFS_HEADER)?;
    }

    let mut written = 0usize;
    for lines in changes
        .iter()
        .filter_map(|change| format_change(configuration_id, change))
    {
        for line in &lines {
            write_line(&mut out, &path, line)?;
        }
        written += 1;
    }

    out.flush().map_err(|e| FsError::io(&path, e))?;

    info!(
        configuration = configuration_id,
        variables = written,
        prefs = %path.display(),
        "applied environment"
    );
    Ok(())
}

/// Opens the file for append, creating it if needed; reports whether it was created.
fn open_prefs(path: &Path) -> GrabResult<(File, bool)> {
    match OpenOptions::new().append(true).create_new(true).open(path) {
        Ok(file) => Ok((file, true)),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => OpenOptions::new()
            .append(true)
            .open(path)
            .map(|file| (file, false))
            .map_err(|e| FsError::io(path, e).into()),
        Err(e) => Err(FsError::io(path, e).into()),
    }
}

fn write_line(out: &mut impl Write, path: &Path, line: &str) -> GrabResult<()> {
    out.write_all(line.as_bytes())
        .and_then(|()| out.write_all(LINE_ENDING.as_bytes()))
        .map_err(|e| FsError::io(path, e).into())
}
