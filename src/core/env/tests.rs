// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::capture::{parse_env_line, parse_env_output};
use super::diff::{ChangeRecord, diff};
use super::map::EnvMap;
use super::vcvars::{baseline_command, vendor_command};
use std::path::Path;

fn env(pairs: &[(&str, &str)]) -> EnvMap {
    pairs.iter().copied().collect()
}

/// Rebuilds `modified` from `base` and the change list.
fn replay(base: &EnvMap, changes: &[ChangeRecord]) -> EnvMap {
    let mut prefixes = std::collections::HashMap::new();
    let mut suffixes = std::collections::HashMap::new();
    let mut result: Vec<(String, String)> = base
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for change in changes {
        match change {
            ChangeRecord::Add { key, value } | ChangeRecord::Modify { key, value } => {
                match result.iter_mut().find(|(k, _)| k == key) {
                    Some(entry) => entry.1.clone_from(value),
                    None => result.push((key.clone(), value.clone())),
                }
            }
            ChangeRecord::ModifyPrefix { key, prefix } => {
                prefixes.insert(key.clone(), prefix.clone());
            }
            ChangeRecord::ModifySuffix { key, suffix } => {
                suffixes.insert(key.clone(), suffix.clone());
            }
            ChangeRecord::Remove { key } => result.retain(|(k, _)| k != key),
        }
    }

    for (key, value) in &mut result {
        let prefix = prefixes.get(key).map_or("", String::as_str);
        let suffix = suffixes.get(key).map_or("", String::as_str);
        *value = format!("{prefix}{value}{suffix}");
    }

    result.into_iter().collect()
}

fn sorted(map: &EnvMap) -> Vec<(String, String)> {
    let mut pairs: Vec<_> = map
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    pairs.sort();
    pairs
}

// =============================================================================
// EnvMap
// =============================================================================

#[test]
fn test_env_map_keeps_first_seen_position_on_overwrite() {
    let mut map = EnvMap::new();
    map.insert("PATH", "/usr/bin");
    map.insert("HOME", "/root");
    let previous = map.insert("PATH", "/opt/bin");

    assert_eq!(previous.as_deref(), Some("/usr/bin"));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["PATH", "HOME"]);
    assert_eq!(map.get("PATH"), Some("/opt/bin"));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_env_map_is_case_sensitive() {
    let map = env(&[("Path", "a"), ("PATH", "b")]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("Path"), Some("a"));
    assert_eq!(map.get("path"), None);
}

// =============================================================================
// Line parsing
// =============================================================================

#[test]
fn test_parse_env_line_splits_at_last_equals() {
    assert_eq!(parse_env_line("A=B=C"), Some(("A=B", "C")));
    assert_eq!(parse_env_line("KEY="), Some(("KEY", "")));
    assert_eq!(parse_env_line("=value"), Some(("", "value")));
    assert_eq!(parse_env_line("no delimiter here"), None);
}

#[test]
fn test_parse_env_output_skips_banner_lines() {
    let output = "\
**********************************************************************
** Visual Studio 2017 Developer Command Prompt v15.9.60
**********************************************************************
[vcvarsall.bat] Environment initialized for: 'x64'
INCLUDE=C:\\VS\\include;
Path=C:\\VS\\bin;C:\\Windows
";
    let map = parse_env_output(output);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["INCLUDE", "Path"]);
    assert_eq!(map.get("Path"), Some("C:\\VS\\bin;C:\\Windows"));
}

// =============================================================================
// Diff
// =============================================================================

#[test]
fn test_diff_prefix_and_add() {
    let base = env(&[("PATH", "/usr/bin")]);
    let modified = env(&[("PATH", "/opt/vendor/bin;/usr/bin"), ("NEWVAR", "1")]);

    assert_eq!(
        diff(&base, &modified),
        vec![
            ChangeRecord::ModifyPrefix {
                key: "PATH".into(),
                prefix: "/opt/vendor/bin;".into(),
            },
            ChangeRecord::Add {
                key: "NEWVAR".into(),
                value: "1".into(),
            },
        ]
    );
}

#[test]
fn test_diff_remove_only() {
    let base = env(&[("INCLUDE", "/a")]);
    let modified = EnvMap::new();

    assert_eq!(
        diff(&base, &modified),
        vec![ChangeRecord::Remove {
            key: "INCLUDE".into()
        }]
    );
}

#[test]
fn test_diff_equal_values_emit_nothing() {
    let base = env(&[("A", "1"), ("B", "")]);
    let modified = env(&[("B", ""), ("A", "1")]);
    assert!(diff(&base, &modified).is_empty());
}

#[test]
fn test_diff_infix_emits_prefix_and_suffix() {
    let base = env(&[("LIB", "core")]);
    let modified = env(&[("LIB", "pre;core;post")]);

    assert_eq!(
        diff(&base, &modified),
        vec![
            ChangeRecord::ModifyPrefix {
                key: "LIB".into(),
                prefix: "pre;".into(),
            },
            ChangeRecord::ModifySuffix {
                key: "LIB".into(),
                suffix: ";post".into(),
            },
        ]
    );
}

#[test]
fn test_diff_unrelated_value_is_full_replacement() {
    let base = env(&[("VSCMD_ARG_TGT_ARCH", "x86")]);
    let modified = env(&[("VSCMD_ARG_TGT_ARCH", "x64")]);

    assert_eq!(
        diff(&base, &modified),
        vec![ChangeRecord::Modify {
            key: "VSCMD_ARG_TGT_ARCH".into(),
            value: "x64".into(),
        }]
    );
}

#[test]
fn test_diff_empty_base_value_is_suffix() {
    let base = env(&[("CL", "")]);
    let modified = env(&[("CL", "/MP")]);

    assert_eq!(
        diff(&base, &modified),
        vec![ChangeRecord::ModifySuffix {
            key: "CL".into(),
            suffix: "/MP".into(),
        }]
    );
}

#[test]
fn test_diff_uses_first_occurrence() {
    let base = env(&[("X", "ab")]);
    let modified = env(&[("X", "abab")]);

    assert_eq!(
        diff(&base, &modified),
        vec![ChangeRecord::ModifySuffix {
            key: "X".into(),
            suffix: "ab".into(),
        }]
    );
}

#[test]
fn test_diff_order_modified_then_removed_in_base_order() {
    let base = env(&[("GONE1", "x"), ("KEEP", "k"), ("GONE2", "y")]);
    let modified = env(&[("NEW", "n"), ("KEEP", "k")]);

    let keys: Vec<String> = diff(&base, &modified)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(keys, vec!["ADDED: NEW=n", "REMOVED: GONE1", "REMOVED: GONE2"]);
}

#[test]
fn test_diff_one_record_per_added_or_removed_key() {
    let base = env(&[("ONLY_BASE_1", "1"), ("SHARED", "s"), ("ONLY_BASE_2", "2")]);
    let modified = env(&[("SHARED", "s"), ("ONLY_MOD_1", "a"), ("ONLY_MOD_2", "b")]);
    let changes = diff(&base, &modified);

    for key in ["ONLY_BASE_1", "ONLY_BASE_2"] {
        let records: Vec<_> = changes.iter().filter(|c| c.key() == key).collect();
        assert_eq!(records.len(), 1, "{key}");
        assert!(matches!(records[0], ChangeRecord::Remove { .. }));
    }
    for key in ["ONLY_MOD_1", "ONLY_MOD_2"] {
        let records: Vec<_> = changes.iter().filter(|c| c.key() == key).collect();
        assert_eq!(records.len(), 1, "{key}");
        assert!(matches!(records[0], ChangeRecord::Add { .. }));
    }
}

#[test]
fn test_diff_replay_reproduces_modified() {
    let cases = [
        (
            env(&[("PATH", "C:\\Windows"), ("TEMP", "C:\\Temp"), ("OLD", "1")]),
            env(&[
                ("PATH", "C:\\VS\\bin;C:\\Windows;C:\\VS\\tools"),
                ("TEMP", "C:\\Temp"),
                ("INCLUDE", "C:\\VS\\include"),
            ]),
        ),
        (
            env(&[("A", ""), ("B", "same"), ("C", "xyz")]),
            env(&[("C", "abc"), ("B", "same"), ("A", "filled")]),
        ),
        (EnvMap::new(), env(&[("ONLY", "new")])),
        (env(&[("ONLY", "old")]), EnvMap::new()),
        (env(&[("X", "ab")]), env(&[("X", "zabab")])),
    ];

    for (base, modified) in &cases {
        let changes = diff(base, modified);
        assert_eq!(
            sorted(&replay(base, &changes)),
            sorted(modified),
            "replay mismatch for {changes:?}"
        );
    }
}

#[test]
fn test_diff_never_mixes_modify_with_prefix_or_suffix() {
    let base = env(&[("A", "1"), ("B", "mid"), ("C", "q")]);
    let modified = env(&[("A", "2"), ("B", "<mid>"), ("C", "q;")]);
    let changes = diff(&base, &modified);

    for key in ["A", "B", "C"] {
        let has_modify = changes
            .iter()
            .any(|c| c.key() == key && matches!(c, ChangeRecord::Modify { .. }));
        let has_partial = changes.iter().any(|c| {
            c.key() == key
                && matches!(
                    c,
                    ChangeRecord::ModifyPrefix { .. } | ChangeRecord::ModifySuffix { .. }
                )
        });
        assert!(!(has_modify && has_partial), "{key} classified both ways");
    }
}

#[test]
fn test_change_record_display() {
    let records = [
        ChangeRecord::Add {
            key: "A".into(),
            value: "1".into(),
        },
        ChangeRecord::Modify {
            key: "B".into(),
            value: "2".into(),
        },
        ChangeRecord::ModifyPrefix {
            key: "PATH".into(),
            prefix: "C:\\VS;".into(),
        },
        ChangeRecord::ModifySuffix {
            key: "LIB".into(),
            suffix: ";C:\\VS\\lib".into(),
        },
        ChangeRecord::Remove { key: "OLD".into() },
    ];
    let dump = records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(dump, @r"
    ADDED: A=1
    MODIFIED: B=2
    MODIFIED_PREFIX: PATH+=C:\VS;
    MODIFIED_SUFFIX: LIB=+;C:\VS\lib
    REMOVED: OLD
    ");
}

// =============================================================================
// Shell commands
// =============================================================================

#[test]
fn test_baseline_command() {
    insta::assert_snapshot!(baseline_command(), @r#""set""#);
}

#[test]
fn test_vendor_command() {
    let script = Path::new(r"C:\VS\VC\Auxiliary\Build\vcvarsall.bat");
    insta::assert_snapshot!(
        vendor_command(script, "x64"),
        @r#"""C:\VS\VC\Auxiliary\Build\vcvarsall.bat" x64 & set""#
    );
}

#[test]
#[cfg(unix)]
fn test_capture_from_shell() {
    use super::capture::capture;
    use crate::core::shell::Shell;

    let shell = Shell::new("/bin/sh", "-c");
    let invocation = shell.invocation(r"printf 'banner\nA=1\nB=x=y\nA=2\n'; exit 3");
    let captured = capture(&invocation).unwrap();

    assert_eq!(captured.exit_code(), Some(3));
    let pairs: Vec<_> = captured.env().iter().collect();
    assert_eq!(pairs, vec![("A", "2"), ("B=x", "y")]);
}

#[test]
fn test_capture_spawn_failure() {
    use super::capture::capture;
    use crate::core::shell::Shell;
    use crate::error::{GrabError, ProcessError};

    let shell = Shell::new("/definitely/not/a/shell_12345", "-c");
    let err = capture(&shell.invocation("set")).unwrap_err();
    assert!(
        matches!(&err, GrabError::Process(e) if matches!(**e, ProcessError::SpawnFailed { .. })),
        "unexpected error: {err}"
    );
}
