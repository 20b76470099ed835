// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Cli, parse_error_exit_code, parse_error_output, try_parse_from};
use crate::cmd::grab::RunFlags;
use clap::CommandFactory;
use clap::error::ErrorKind;
use std::path::PathBuf;

#[test]
fn test_command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_defaults() {
    let cli = try_parse_from(["grabenv"]).unwrap();
    assert!(cli.arch.is_none());
    assert!(cli.vs_root.is_none());
    assert!(!cli.dry_run);
    assert!(!cli.verbose);
    assert!(cli.to_config_overrides().is_empty());
    assert_eq!(cli.run_flags(), RunFlags::empty());
}

#[test]
fn test_parse_camel_case_options() {
    let cli = try_parse_from([
        "grabenv",
        "--arch",
        "x86",
        "--vsRoot",
        r"D:\VS",
        "--projectRoot",
        "proj",
        "--namePattern",
        "Debug.*",
        "-n",
        "-v",
    ])
    .unwrap();

    assert_eq!(cli.arch.as_deref(), Some("x86"));
    assert_eq!(cli.vs_root, Some(PathBuf::from(r"D:\VS")));
    assert_eq!(cli.project_root, Some(PathBuf::from("proj")));
    assert_eq!(cli.name_pattern.as_deref(), Some("Debug.*"));
    assert_eq!(cli.run_flags(), RunFlags::DRY_RUN | RunFlags::VERBOSE);
}

#[test]
fn test_parse_kebab_aliases() {
    let cli = try_parse_from([
        "grabenv",
        "--vs-root",
        "vs",
        "--project-root",
        "p",
        "--name-pattern",
        "R",
    ])
    .unwrap();
    assert_eq!(cli.vs_root, Some(PathBuf::from("vs")));
    assert_eq!(cli.project_root, Some(PathBuf::from("p")));
    assert_eq!(cli.name_pattern.as_deref(), Some("R"));
}

#[test]
fn test_config_overrides() {
    let cli = try_parse_from([
        "grabenv",
        "--arch",
        "arm64",
        "--namePattern",
        "Release",
        "-l",
        "4",
        "--log-file",
        "grab.log",
    ])
    .unwrap();

    let keys: Vec<_> = cli.to_config_overrides().into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![
            "grab.arch",
            "grab.name_pattern",
            "global.log_level",
            "global.log_file"
        ]
    );
}

#[test]
fn test_log_level_out_of_range() {
    let err = try_parse_from(["grabenv", "-l", "6"]).unwrap_err();
    assert_eq!(parse_error_exit_code(&err), 1);
}

#[test]
fn test_help_flags_exit_zero() {
    for flag in ["-h", "-?", "--help"] {
        let err = try_parse_from(["grabenv", flag]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp, "flag {flag}");
        assert_eq!(parse_error_exit_code(&err), 0);
        assert!(
            parse_error_output(&err).contains("Apply environment to Eclipse CDT configurations")
        );
    }
}

#[test]
fn test_unknown_option_exits_one_with_usage() {
    let err = try_parse_from(["grabenv", "--bogus"]).unwrap_err();
    assert_eq!(parse_error_exit_code(&err), 1);

    let output = parse_error_output(&err);
    assert!(output.starts_with("error:"), "unexpected output: {output}");
    assert!(output.contains("--bogus"));
    assert!(output.contains("Usage:"));
    assert!(output.contains("--namePattern"));
}

#[test]
fn test_missing_option_value() {
    let err = try_parse_from(["grabenv", "--arch"]).unwrap_err();
    assert_eq!(parse_error_exit_code(&err), 1);
}
