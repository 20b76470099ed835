// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::try_parse() --> Config --> Logging --> Shell::resolve --> run_grab
//!   parse error: stdout, exit 1 (help/version: exit 0)
//!   run error:   stderr "Error: ...", exit 1
//! ```

use std::process::ExitCode;

use anyhow::Context;
use grabenv_rs::cli::{self, Cli};
use grabenv_rs::cmd::grab::{GrabOptions, run_grab};
use grabenv_rs::config::{Config, ConfigLoader, ENV_PREFIX, LOCAL_CONFIG_FILE};
use grabenv_rs::core::env::vcvars::ShellSource;
use grabenv_rs::error::Result;
use grabenv_rs::logging::{LogConfig, init_logging};
use tracing::{debug, info};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = match cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            print!("{}", cli::parse_error_output(&e));
            return ExitCode::from(cli::parse_error_exit_code(&e));
        }
    };

    let loader = build_config_loader(&cli);
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    for file in &loaded_files {
        debug!(source = %file, "loaded config");
    }
    for option in config.format_options() {
        debug!("{option}");
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let shell = config.shell().resolve().context("failed to locate the shell")?;
    debug!(shell = %shell.program().display(), "using shell");

    let options = GrabOptions::from_config(config, cli.run_flags())?;
    let source = ShellSource::new(shell);

    let stdout = std::io::stdout();
    let report = run_grab(&options, &source, &mut stdout.lock())?;

    info!(
        changes = report.changes.len(),
        configurations = report.configurations.len(),
        selected = report.selected.len(),
        written = report.written,
        "done"
    );
    Ok(())
}

fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(LOCAL_CONFIG_FILE);
    if let Some(ref path) = cli.config {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in cli.to_config_overrides() {
        loader = loader.set(key, value);
    }
    loader
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}
