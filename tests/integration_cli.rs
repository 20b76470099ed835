// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use grabenv_rs::cli::{parse_error_exit_code, parse_error_output, try_parse_from};
use grabenv_rs::cmd::grab::RunFlags;
use grabenv_rs::config::ConfigLoader;
use std::path::PathBuf;

// =============================================================================
// Options
// =============================================================================

#[test]
fn cli_typical_invocation() {
    let cli = try_parse_from([
        "grabenv",
        "--vsRoot",
        r"C:\Program Files\Microsoft Visual Studio\2022\Community",
        "--arch",
        "x86_amd64",
        "--projectRoot",
        r"C:\work\app",
        "--namePattern",
        "Debug|Release",
        "--verbose",
    ])
    .unwrap();

    assert_eq!(cli.arch.as_deref(), Some("x86_amd64"));
    assert_eq!(cli.project_root, Some(PathBuf::from(r"C:\work\app")));
    assert_eq!(cli.run_flags(), RunFlags::VERBOSE);
}

#[test]
fn cli_short_flags_combine() {
    let cli = try_parse_from(["grabenv", "-nv", "-l", "0"]).unwrap();
    assert_eq!(cli.run_flags(), RunFlags::DRY_RUN | RunFlags::VERBOSE);
    assert_eq!(cli.log_level, Some(0));
}

#[test]
fn cli_overrides_feed_the_config_loader() {
    let cli = try_parse_from([
        "grabenv",
        "--arch",
        "arm64",
        "--namePattern",
        "Debug",
        "--projectRoot",
        "proj",
        "-l",
        "2",
    ])
    .unwrap();

    let mut loader = ConfigLoader::new().add_toml_str("[grab]\narch = \"x86\"\n");
    for (key, value) in cli.to_config_overrides() {
        loader = loader.set(key, value);
    }
    let config = loader.build().unwrap();

    assert_eq!(config.grab.arch, "arm64");
    assert_eq!(config.grab.name_pattern, "Debug");
    assert_eq!(config.project.root, PathBuf::from("proj"));
    assert_eq!(config.global.log_level.as_u8(), 2);
}

#[test]
fn cli_invalid_pattern_is_a_config_error() {
    let cli = try_parse_from(["grabenv", "--namePattern", "[a-"]).unwrap();

    let mut loader = ConfigLoader::new();
    for (key, value) in cli.to_config_overrides() {
        loader = loader.set(key, value);
    }
    assert!(loader.build().is_err());
}

// =============================================================================
// Exit behavior
// =============================================================================

#[test]
fn cli_help_is_success() {
    let err = try_parse_from(["grabenv", "-?"]).unwrap_err();
    assert_eq!(parse_error_exit_code(&err), 0);
    let output = parse_error_output(&err);
    assert!(output.contains("--vsRoot"));
    assert!(output.contains("--dry-run"));
}

#[test]
fn cli_version_is_success() {
    let err = try_parse_from(["grabenv", "--version"]).unwrap_err();
    assert_eq!(parse_error_exit_code(&err), 0);
    assert!(parse_error_output(&err).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_positional_argument_is_rejected() {
    let err = try_parse_from(["grabenv", "stray"]).unwrap_err();
    assert_eq!(parse_error_exit_code(&err), 1);
    assert!(parse_error_output(&err).contains("Usage:"));
}
