// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment capture and diffing.
//!
//! # Architecture
//!
//! ```text
//! EnvironmentSource (vcvars)
//!   baseline() ----> EnvMap (base)  --+
//!   vendor()   ----> EnvMap (vs)    --+--> diff() --> Vec<ChangeRecord>
//!        |
//!   capture(ShellInvocation): KEY=VALUE lines --> EnvMap
//! ```
//!
//! - **Case-sensitive keys**: upper-casing happens when preferences are written
//! - **First-seen order**: a repeated key overwrites the value in place

pub mod capture;
pub mod diff;
pub mod map;
pub mod vcvars;

#[cfg(test)]
mod tests;
