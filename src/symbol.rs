// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Width-parametric symbol and suffix-array entry types.
//!
//! The dictionary and the input are streams of `Symbol`s (8, 16, 32 or
//! 64 bits wide), the suffix array is a stream of `SaIndex` entries (32 or
//! 64 bits). Both are little-endian on disk. Widths are picked at the entry
//! point and monomorphized from there; there is no runtime tagging.

use std::fmt::Debug;
use std::io::{self, Write};

/// An unsigned symbol of the dictionary and input alphabet.
pub trait Symbol: Copy + Eq + Ord + Debug {
    /// Symbol width in bytes on disk
    const BYTES: usize;

    /// Decode one symbol from exactly `Self::BYTES` little-endian bytes.
    fn from_le(buf: &[u8]) -> Self;

    /// Write this symbol as `Self::BYTES` little-endian bytes.
    fn put_le<W: Write>(self, out: &mut W) -> io::Result<()>;

    /// Zero-extend to 64 bits (literal phrases carry symbols this way).
    fn to_u64(self) -> u64;

    /// Truncate a 64-bit value back to symbol width.
    fn from_u64(v: u64) -> Self;
}

macro_rules! impl_symbol {
    ($($t:ty),*) => {$(
        impl Symbol for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline]
            fn from_le(buf: &[u8]) -> Self {
                <$t>::from_le_bytes(buf[..<$t as Symbol>::BYTES].try_into().unwrap())
            }

            #[inline]
            fn put_le<W: Write>(self, out: &mut W) -> io::Result<()> {
                out.write_all(&self.to_le_bytes())
            }

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_u64(v: u64) -> Self {
                v as $t
            }
        }
    )*};
}

impl_symbol!(u8, u16, u32, u64);

/// An entry of the suffix array: an index into the dictionary.
pub trait SaIndex: Copy + Debug {
    /// Entry width in bytes on disk
    const BYTES: usize;

    /// Decode one entry from exactly `Self::BYTES` little-endian bytes.
    fn from_le(buf: &[u8]) -> Self;

    /// The dictionary position this entry refers to.
    fn to_u64(self) -> u64;
}

macro_rules! impl_sa_index {
    ($($t:ty),*) => {$(
        impl SaIndex for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline]
            fn from_le(buf: &[u8]) -> Self {
                <$t>::from_le_bytes(buf[..<$t as SaIndex>::BYTES].try_into().unwrap())
            }

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    )*};
}

impl_sa_index!(u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_widths() {
        assert_eq!(<u8 as Symbol>::BYTES, 1);
        assert_eq!(<u16 as Symbol>::BYTES, 2);
        assert_eq!(<u32 as Symbol>::BYTES, 4);
        assert_eq!(<u64 as Symbol>::BYTES, 8);
    }

    #[test]
    fn test_symbol_le_roundtrip() {
        let v: u32 = 0x11223344;
        let mut buf = Vec::new();
        v.put_le(&mut buf).unwrap();
        assert_eq!(buf, [0x44, 0x33, 0x22, 0x11]);
        assert_eq!(<u32 as Symbol>::from_le(&buf), v);
    }

    #[test]
    fn test_from_u64_truncates() {
        assert_eq!(<u8 as Symbol>::from_u64(0x1ff), 0xff);
        assert_eq!(<u16 as Symbol>::from_u64(0x1_0001), 1);
    }
}
