// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment delta between a baseline and a modified capture.
//!
//! ```text
//! for (key, new) in modified:
//!   base missing          --> Add(key, new)
//!   base == new           --> (nothing)
//!   base not within new   --> Modify(key, new)
//!   new = pre + base + suf --> ModifyPrefix(key, pre)?  ModifySuffix(key, suf)?
//! for key in base, not in modified:
//!                         --> Remove(key)
//! ```
//!
//! Prefix/suffix records let the preferences file use "append" semantics,
//! so whatever the IDE contributes to e.g. `PATH` itself is preserved.

use std::fmt;

use super::map::EnvMap;

/// A single change made to the environment by the vendor script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeRecord {
    /// Variable did not exist in the baseline.
    Add { key: String, value: String },
    /// Variable value was replaced outright.
    Modify { key: String, value: String },
    /// Text prepended to the baseline value.
    ModifyPrefix { key: String, prefix: String },
    /// Text appended to the baseline value.
    ModifySuffix { key: String, suffix: String },
    /// Variable no longer present after the script ran.
    Remove { key: String },
}

impl ChangeRecord {
    /// Variable name this record applies to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Add { key, .. }
            | Self::Modify { key, .. }
            | Self::ModifyPrefix { key, .. }
            | Self::ModifySuffix { key, .. }
            | Self::Remove { key } => key,
        }
    }

    /// Payload carried by the record; `None` for [`ChangeRecord::Remove`].
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Add { value, .. } | Self::Modify { value, .. } => Some(value),
            Self::ModifyPrefix { prefix, .. } => Some(prefix),
            Self::ModifySuffix { suffix, .. } => Some(suffix),
            Self::Remove { .. } => None,
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { key, value } => write!(f, "ADDED: {key}={value}"),
            Self::Modify { key, value } => write!(f, "MODIFIED: {key}={value}"),
            Self::ModifyPrefix { key, prefix } => write!(f, "MODIFIED_PREFIX: {key}+={prefix}"),
            Self::ModifySuffix { key, suffix } => write!(f, "MODIFIED_SUFFIX: {key}=+{suffix}"),
            Self::Remove { key } => write!(f, "REMOVED: {key}"),
        }
    }
}

/// Computes the ordered change list turning `base` into `modified`.
///
/// Records for keys of `modified` come first, in `modified` order, followed
/// by one `Remove` per key only present in `base`, in `base` order.
///
/// # Example
/// ```
/// use grabenv_rs::core::env::diff::{diff, ChangeRecord};
/// use grabenv_rs::core::env::map::EnvMap;
///
/// let base: EnvMap = [("PATH", "/usr/bin")].into_iter().collect();
/// let modified: EnvMap = [("PATH", "/opt/vendor/bin;/usr/bin")].into_iter().collect();
///
/// assert_eq!(
///     diff(&base, &modified),
///     vec![ChangeRecord::ModifyPrefix {
///         key: "PATH".into(),
///         prefix: "/opt/vendor/bin;".into(),
///     }]
/// );
/// ```
#[must_use]
pub fn diff(base: &EnvMap, modified: &EnvMap) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();

    for (key, new_value) in modified.iter() {
        match base.get(key) {
            None => changes.push(ChangeRecord::Add {
                key: key.to_owned(),
                value: new_value.to_owned(),
            }),
            Some(old_value) if old_value == new_value => {}
            Some(old_value) => classify(key, old_value, new_value, &mut changes),
        }
    }

    changes.extend(
        base.keys()
            .filter(|key| !modified.contains_key(key))
            .map(|key| ChangeRecord::Remove {
                key: key.to_owned(),
            }),
    );

    changes
}

/// Emits either a full replacement or the prefix/suffix pair for one key.
fn classify(key: &str, old_value: &str, new_value: &str, changes: &mut Vec<ChangeRecord>) {
    let Some(idx) = new_value.find(old_value) else {
        changes.push(ChangeRecord::Modify {
            key: key.to_owned(),
            value: new_value.to_owned(),
        });
        return;
    };

    let prefix = &new_value[..idx];
    let suffix = &new_value[idx + old_value.len()..];

    if !prefix.is_empty() {
        changes.push(ChangeRecord::ModifyPrefix {
            key: key.to_owned(),
            prefix: prefix.to_owned(),
        });
    }
    if !suffix.is_empty() {
        changes.push(ChangeRecord::ModifySuffix {
            key: key.to_owned(),
            suffix: suffix.to_owned(),
        });
    }
}
