// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for shell execution and environment capture.
//!
//! ```text
//!            core
//!             |
//!      +------+------+
//!      v             v
//!    shell          env
//!      |             |
//!   Shell         EnvMap, capture()
//!   Invocation    diff() --> ChangeRecord
//!                 EnvironmentSource / ShellSource
//! ```

pub mod env;
pub mod shell;
