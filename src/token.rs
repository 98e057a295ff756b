// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;
use std::str::FromStr;

/// One phrase of the compressed stream.
///
/// A normal phrase (`len >= 1`) means "copy `len` symbols of the dictionary
/// starting at `pos`". A literal phrase (`len == 0`) carries a symbol that
/// does not occur in the dictionary at all, zero-extended into `pos`. A
/// length of zero is free for this purpose because copying zero symbols is
/// never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Dictionary position, or the literal symbol value
    pub pos: u64,
    /// Copy length in symbols; 0 marks a literal
    pub len: i64,
}

impl Token {
    /// A dictionary reference covering `dict[pos..pos + len)`.
    pub fn phrase(pos: u64, len: i64) -> Self {
        debug_assert!(len >= 1);
        Token { pos, len }
    }

    /// A literal phrase carrying `sym` directly.
    pub fn literal(sym: u64) -> Self {
        Token { pos: sym, len: 0 }
    }

    pub fn is_literal(&self) -> bool {
        self.len == 0
    }

    /// Number of output symbols this phrase reconstructs (1 for a literal).
    pub fn output_len(&self) -> u64 {
        if self.len == 0 {
            1
        } else {
            self.len as u64
        }
    }
}

/// On-disk serialization of the phrase stream.
///
/// The stream is raw: no header, no magic, no trailer. The reader must be
/// told the format out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `pos` and `len` as little-endian u32 pairs, 8 bytes per phrase
    Fixed32,
    /// `pos` and `len` as little-endian u64 pairs, 16 bytes per phrase
    Fixed64,
    /// decimal `pos`, space, decimal `len`, newline
    Ascii,
    /// LEB128 `pos` then LEB128 `len`
    Vbyte,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Fixed32 => "32x2",
            Format::Fixed64 => "64x2",
            Format::Ascii => "ascii",
            Format::Vbyte => "vbyte",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "32x2" => Ok(Format::Fixed32),
            "64x2" => Ok(Format::Fixed64),
            "ascii" => Ok(Format::Ascii),
            "vbyte" => Ok(Format::Vbyte),
            other => Err(format!(
                "format '{}' is not \"32x2\", \"64x2\", \"ascii\" or \"vbyte\"",
                other
            )),
        }
    }
}
