// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;
use std::io;

/// Result type for RLZ operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for RLZ compression/decompression
#[derive(Debug)]
pub enum Error {
    /// Filesystem or stream failure
    Io(io::Error),

    /// The phrase stream is malformed (truncated phrase, unterminated vbyte, ...)
    InvalidInput(String),

    /// A binary search over the suffix array failed in a way that is only
    /// possible when the suffix array does not describe the dictionary.
    /// Usually a width mismatch between the dictionary and the array.
    CorruptSuffixArray {
        /// Symbol being searched for, zero-extended
        sym: u64,
        /// Comparison column (match depth)
        depth: u64,
        /// Interval bounds at the time of the failure
        lo: usize,
        hi: usize,
    },

    /// A phrase cannot be represented in the selected output format
    FormatMismatch {
        /// 0-based index of the offending phrase
        phrase: u64,
        /// The value that did not fit
        value: u64,
    },

    /// An internal invariant was violated
    Bug(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "rlz: i/o error: {}", err),
            Error::InvalidInput(msg) => write!(f, "rlz: invalid input: {}", msg),
            Error::CorruptSuffixArray { sym, depth, lo, hi } => write!(
                f,
                "rlz: failed binary search; the suffix array does not match the \
                 dictionary (check your width flags and suffix array processing): \
                 sym={:#x} depth={} lo={} hi={}",
                sym, depth, lo, hi
            ),
            Error::FormatMismatch { phrase, value } => write!(
                f,
                "rlz: phrase {} holds value {} which does not fit the output format",
                phrase, value
            ),
            Error::Bug(msg) => write!(f, "rlz: internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
