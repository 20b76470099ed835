// grabenv-rs: Visual Studio environment grabber for Eclipse CDT
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Legacy Windows encoding conversion for shell output.
//!
//! ```text
//! cmd.exe stdout        LineDecoder           EnvMap
//! CP1252/OEM/UTF-16 --(split + decode)--> UTF-8 lines --> KEY=VALUE
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences → U+FFFD.

use encoding_rs::{IBM866, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Encoding of a shell's standard output.
///
/// Maps to Windows code pages:
/// - `Utf8`: UTF-8 (65001)
/// - `Utf16Le`: UTF-16 LE (1200), what `cmd.exe /u` emits
/// - `Acp`: Active Code Page, typically Windows-1252 (1252)
/// - `Oem`: OEM Code Page (`encoding_rs` only ships IBM866)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Utf8,
    Utf16le,
    Acp,
    Oem,
}

impl Default for Encoding {
    fn default() -> Self {
        if cfg!(windows) { Self::Acp } else { Self::Utf8 }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf8"),
            Self::Utf16le => write!(f, "utf16le"),
            Self::Acp => write!(f, "acp"),
            Self::Oem => write!(f, "oem"),
        }
    }
}

/// Converts bytes from the given encoding to UTF-8.
///
/// Invalid sequences are replaced with U+FFFD.
///
/// # Example
/// ```
/// use grabenv_rs::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"caf\xe9"; // "café" in Windows-1252
/// assert_eq!(bytes_to_utf8(Encoding::Acp, cp1252_bytes), "café");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(bytes),
        Encoding::Utf16le => utf16_le_to_utf8(bytes),
        Encoding::Acp => WINDOWS_1252.decode_without_bom_handling(bytes).0,
        Encoding::Oem => IBM866.decode_without_bom_handling(bytes).0,
    }
}

/// Converts UTF-16 LE bytes to UTF-8, ignoring a trailing odd byte.
fn utf16_le_to_utf8(bytes: &[u8]) -> Cow<'static, str> {
    let len = bytes.len() & !1;
    if len == 0 {
        return Cow::Borrowed("");
    }

    let units: Vec<u16> = bytes[..len]
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Cow::Owned(String::from_utf16_lossy(&units))
}

/// Incremental splitter turning raw output chunks into decoded lines.
///
/// Bytes after the last line break are held until more input arrives or
/// [`LineDecoder::finish`] is called. Empty lines are dropped; LF, CR and
/// CRLF all terminate a line.
///
/// # Example
/// ```
/// use grabenv_rs::utility::encoding::{Encoding, LineDecoder};
///
/// let mut decoder = LineDecoder::new(Encoding::Acp);
/// assert_eq!(decoder.push(b"PATH=C:\\bin\r\nINCL"), vec!["PATH=C:\\bin"]);
/// assert_eq!(decoder.push(b"UDE=x\r\n"), vec!["INCLUDE=x"]);
/// assert_eq!(decoder.finish(), None);
/// ```
#[derive(Debug)]
pub struct LineDecoder {
    encoding: Encoding,
    pending: Vec<u8>,
}

impl LineDecoder {
    #[must_use]
    pub const fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Feeds a chunk of output and returns every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let width = self.unit_width();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut offset = 0;

        while offset + width <= self.pending.len() {
            if self.is_break(offset) {
                if offset > start {
                    lines.push(self.decode(start, offset));
                }
                start = offset + width;
            }
            offset += width;
        }

        self.pending.drain(..start);
        lines
    }

    /// Flushes the unterminated tail, if any.
    pub fn finish(&mut self) -> Option<String> {
        let width = self.unit_width();
        let end = self.pending.len() - self.pending.len() % width;
        let line = (end > 0).then(|| self.decode(0, end));
        self.pending.clear();
        line
    }

    const fn unit_width(&self) -> usize {
        match self.encoding {
            Encoding::Utf16le => 2,
            _ => 1,
        }
    }

    fn is_break(&self, offset: usize) -> bool {
        let unit = match self.encoding {
            Encoding::Utf16le => {
                u16::from_le_bytes([self.pending[offset], self.pending[offset + 1]])
            }
            _ => u16::from(self.pending[offset]),
        };
        unit == u16::from(b'\n') || unit == u16::from(b'\r')
    }

    fn decode(&self, start: usize, end: usize) -> String {
        bytes_to_utf8(self.encoding, &self.pending[start..end]).into_owned()
    }
}
