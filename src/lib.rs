// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)         cmd::grab::run_grab
//!                |                     |
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-----+---------------+-----'
//!                    |               |
//!                    v               v
//!                  core             cdt
//!           shell, env capture   .cproject discovery
//!           diff, sources        prefs writer
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cdt;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod utility;
