// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build configuration discovery from `.cproject`.
//!
//! ```text
//! .cproject --> roxmltree::Document
//!   descendants()
//!     storageModule
//!       @moduleId == "org.eclipse.cdt.core.settings"
//!       @name present
//!   --> [ConfigurationRecord { id, name }]   (document order, ids unique)
//! ```

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, trace};

use super::{ConfigurationRecord, ProjectLayout};
use crate::error::{DescriptorError, GrabResult};

/// Element holding one configuration's settings.
const STORAGE_MODULE: &str = "storageModule";

/// `moduleId` of the CDT core settings storage modules.
pub const SETTINGS_MODULE_ID: &str = "org.eclipse.cdt.core.settings";

/// Reads the project descriptor and lists its build configurations.
///
/// # Errors
///
/// Returns a `DescriptorError` if the descriptor cannot be read, is not
/// well-formed, has a settings module without an `id`, or repeats an id.
pub fn discover(layout: &ProjectLayout) -> GrabResult<Vec<ConfigurationRecord>> {
    let path = layout.descriptor_path();
    debug!(descriptor = %path.display(), "loading configurations");

    let text = std::fs::read_to_string(&path).map_err(|source| DescriptorError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_descriptor(&text, &path)
}

/// Parses descriptor text; `path` is only used in error messages.
///
/// # Errors
///
/// Returns a `DescriptorError` if the text is not well-formed XML, a settings
/// module has no `id`, or an id appears twice.
pub fn parse_descriptor(text: &str, path: &Path) -> GrabResult<Vec<ConfigurationRecord>> {
    let document = roxmltree::Document::parse(text).map_err(|e| DescriptorError::Malformed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut records = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    let modules = document.descendants().filter(|node| {
        node.has_tag_name(STORAGE_MODULE)
            && node.attribute("moduleId") == Some(SETTINGS_MODULE_ID)
            && node.has_attribute("name")
    });

    for node in modules {
        let name = node.attribute("name").unwrap_or_default().to_owned();
        let Some(id) = node.attribute("id") else {
            return Err(DescriptorError::MissingAttribute {
                path: path.display().to_string(),
                name,
                attribute: "id",
            }
            .into());
        };

        if let Some(&previous) = seen.get(id) {
            let previous: &ConfigurationRecord = &records[previous];
            return Err(DescriptorError::AmbiguousConfiguration {
                id: id.to_owned(),
                name,
                previous_name: previous.name.clone(),
            }
            .into());
        }

        trace!(id, name = %name, "found configuration");
        seen.insert(id.to_owned(), records.len());
        records.push(ConfigurationRecord {
            id: id.to_owned(),
            name,
        });
    }

    debug!(count = records.len(), "discovered configurations");
    Ok(records)
}
