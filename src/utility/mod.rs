// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   bytes_to_utf8()  CP1252/OEM/UTF-16 --> UTF-8
//!   LineDecoder      streaming line splitter
//! ```

pub mod encoding;
