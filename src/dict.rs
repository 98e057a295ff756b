// Copyright 2025 Karpeles Lab Inc.
// Dictionary support for RLZ compression

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Dictionary for RLZ compression
///
/// The whole dictionary is held in memory as an array of W-bit symbols and
/// is immutable after load. The greedy parser refers into it through the
/// suffix array; the decompressor copies slices out of it.
pub struct Dict<T: Symbol> {
    syms: Vec<T>,
}

impl<T: Symbol> Dict<T> {
    /// Load a dictionary file, reinterpreting each `T::BYTES` consecutive
    /// little-endian bytes as one symbol. Trailing bytes that do not fill a
    /// whole symbol are dropped with a warning.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            Error::Io(std::io::Error::new(
                err.kind(),
                format!("{}: {}", path.display(), err),
            ))
        })?;
        let dict = Self::from_bytes(&bytes);
        log::debug!("{}: read {} symbols", path.display(), dict.len());
        Ok(dict)
    }

    /// Build a dictionary from raw little-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut chunks = bytes.chunks_exact(T::BYTES);
        let syms = chunks.by_ref().map(T::from_le).collect();
        if !chunks.remainder().is_empty() {
            log::warn!(
                "dictionary size is indivisible by {}; ignoring {} trailing bytes",
                T::BYTES,
                chunks.remainder().len()
            );
        }
        Dict { syms }
    }

    /// Build a dictionary from symbols already in memory.
    pub fn from_symbols(syms: Vec<T>) -> Self {
        Dict { syms }
    }

    /// Dictionary length in symbols
    pub fn len(&self) -> usize {
        self.syms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syms.is_empty()
    }

    /// The dictionary as a symbol slice
    pub fn as_slice(&self) -> &[T] {
        &self.syms
    }

    /// Symbol at position `i`, or `None` past the end of the dictionary
    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        self.syms.get(i).copied()
    }
}

impl<T: Symbol> std::ops::Index<usize> for Dict<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.syms[i]
    }
}
