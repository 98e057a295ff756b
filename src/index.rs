// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Suffix-array index over the dictionary.
//!
//! The suffix array is a permutation of the dictionary's positions that
//! sorts its suffixes lexicographically, with the implicit end-of-string
//! sorting before every real symbol. It is produced by an external tool and
//! loaded here verbatim; sortedness is not validated up front, and a
//! violation surfaces later as `Error::CorruptSuffixArray`.

use std::fs;
use std::path::Path;

use crate::dict::Dict;
use crate::error::{Error, Result};
use crate::symbol::{SaIndex, Symbol};

/// Suffix array over a dictionary, held wholly in memory.
pub struct SuffixArray<S: SaIndex> {
    entries: Vec<S>,
}

impl<S: SaIndex> SuffixArray<S> {
    /// Load a suffix-array file of `S::BYTES`-wide little-endian entries.
    /// Trailing bytes that do not fill a whole entry are dropped with a
    /// warning.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            Error::Io(std::io::Error::new(
                err.kind(),
                format!("{}: {}", path.display(), err),
            ))
        })?;
        let sa = Self::from_bytes(&bytes);
        log::debug!("{}: read {} suffix array entries", path.display(), sa.len());
        Ok(sa)
    }

    /// Build a suffix array from raw little-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut chunks = bytes.chunks_exact(S::BYTES);
        let entries = chunks.by_ref().map(S::from_le).collect();
        if !chunks.remainder().is_empty() {
            log::warn!(
                "suffix array size is indivisible by {}; ignoring {} trailing bytes",
                S::BYTES,
                chunks.remainder().len()
            );
        }
        SuffixArray { entries }
    }

    /// Build a suffix array from entries already in memory.
    pub fn from_entries(entries: Vec<S>) -> Self {
        SuffixArray { entries }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.entries
    }

    /// The dictionary position stored at index `i`.
    #[inline]
    pub fn get(&self, i: usize) -> u64 {
        self.entries[i].to_u64()
    }
}

/// The symbol at comparison column `depth` of the suffix starting at `entry`,
/// or `None` when the suffix ends before that column. `None` sorts before
/// `Some(_)`, which is exactly the end-of-string convention.
#[inline]
fn column<T: Symbol, S: SaIndex>(dict: &Dict<T>, entry: S, depth: u64) -> Option<T> {
    let i = entry.to_u64().checked_add(depth)?;
    dict.get(i as usize)
}

/// Smallest index `m` in `[lo, hi]` whose suffix has symbol `sym` at column
/// `depth`, or `None` when no suffix in the interval does.
///
/// The interval must already be narrowed to suffixes sharing the first
/// `depth` symbols; each search step reads one symbol from the dictionary.
pub fn search_left<T: Symbol, S: SaIndex>(
    dict: &Dict<T>,
    sa: &SuffixArray<S>,
    sym: T,
    depth: u64,
    lo: usize,
    hi: usize,
) -> Option<usize> {
    let range = &sa.as_slice()[lo..=hi];
    let idx = lo + range.partition_point(|&e| column(dict, e, depth) < Some(sym));
    if idx <= hi && column(dict, sa.as_slice()[idx], depth) == Some(sym) {
        Some(idx)
    } else {
        None
    }
}

/// Largest index `m` in `[lo, hi]` whose suffix has symbol `sym` at column
/// `depth`, or `None` when no suffix in the interval does.
///
/// When `search_left` succeeded over the same interval this cannot fail
/// against a well-formed suffix array; the caller treats a failure as
/// `CorruptSuffixArray`.
pub fn search_right<T: Symbol, S: SaIndex>(
    dict: &Dict<T>,
    sa: &SuffixArray<S>,
    sym: T,
    depth: u64,
    lo: usize,
    hi: usize,
) -> Option<usize> {
    let range = &sa.as_slice()[lo..=hi];
    let idx = lo + range.partition_point(|&e| column(dict, e, depth) <= Some(sym));
    if idx > lo && column(dict, sa.as_slice()[idx - 1], depth) == Some(sym) {
        Some(idx - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "ababab": suffixes sorted are ab(4) abab(2) ababab(0) b(5) bab(3) babab(1)
    fn ababab() -> (Dict<u8>, SuffixArray<u32>) {
        (
            Dict::from_bytes(b"ababab"),
            SuffixArray::from_entries(vec![4, 2, 0, 5, 3, 1]),
        )
    }

    #[test]
    fn test_from_bytes_widths() {
        let sa = SuffixArray::<u32>::from_bytes(&[1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(sa.len(), 2);
        assert_eq!(sa.get(1), 2);

        let sa = SuffixArray::<u64>::from_bytes(&[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(sa.get(0), 3);
    }

    #[test]
    fn test_search_first_column() {
        let (dict, sa) = ababab();
        // 'a' occupies SA[0..=2], 'b' occupies SA[3..=5]
        assert_eq!(search_left(&dict, &sa, b'a', 0, 0, 5), Some(0));
        assert_eq!(search_right(&dict, &sa, b'a', 0, 0, 5), Some(2));
        assert_eq!(search_left(&dict, &sa, b'b', 0, 0, 5), Some(3));
        assert_eq!(search_right(&dict, &sa, b'b', 0, 0, 5), Some(5));
        assert_eq!(search_left(&dict, &sa, b'c', 0, 0, 5), None);
    }

    #[test]
    fn test_search_deeper_column() {
        let (dict, sa) = ababab();
        // within the 'a' block, column 1 is always 'b'
        assert_eq!(search_left(&dict, &sa, b'b', 1, 0, 2), Some(0));
        assert_eq!(search_right(&dict, &sa, b'b', 1, 0, 2), Some(2));
        assert_eq!(search_left(&dict, &sa, b'a', 1, 0, 2), None);
        // within the 'b' block, column 1: suffix "b" (SA[3]) has ended,
        // suffixes "bab" and "babab" continue with 'a'
        assert_eq!(search_left(&dict, &sa, b'a', 1, 3, 5), Some(4));
        assert_eq!(search_right(&dict, &sa, b'a', 1, 3, 5), Some(5));
    }

    #[test]
    fn test_end_of_string_sorts_first() {
        let (dict, sa) = ababab();
        // "ab" (SA[0]) ends at column 2; searching 'a' at column 2 within
        // the "ab" block must land past it, on "abab"
        assert_eq!(search_left(&dict, &sa, b'a', 2, 0, 2), Some(1));
        assert_eq!(search_right(&dict, &sa, b'a', 2, 0, 2), Some(2));
    }

    #[test]
    fn test_single_element_interval() {
        let (dict, sa) = ababab();
        assert_eq!(search_left(&dict, &sa, b'a', 0, 2, 2), Some(2));
        assert_eq!(search_right(&dict, &sa, b'a', 0, 2, 2), Some(2));
        assert_eq!(search_left(&dict, &sa, b'b', 0, 2, 2), None);
    }
}
