// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! LEB128 integers for the `vbyte` phrase format.
//!
//! Numbers are emitted as 7-bit groups, little end first; every group except
//! the last has its high bit set. Zero is a single `0x00` byte.

use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};

/// Maximum encoded length of a 64-bit varint
pub const MAX_VARINT_LEN64: usize = 10;

/// Encode a varint into the buffer.
/// Returns the number of bytes written.
pub fn encode_varint(dst: &mut [u8], mut value: u64) -> usize {
    let mut i = 0;

    while value >= 0x80 {
        dst[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }

    dst[i] = value as u8;
    i + 1
}

/// Decode a varint from the stream.
///
/// Returns `None` when the stream is exhausted before the first byte (a
/// clean end between numbers). A stream ending mid-number, or a number whose
/// accumulated shift reaches `max_bits` without a terminator, is
/// `InvalidInput`.
pub fn read_varint<R: Read>(r: &mut R, max_bits: u32) -> Result<Option<u64>> {
    let mut value = 0u64;
    let mut shift = 0u32;
    let mut first = true;

    loop {
        let mut buf = [0u8; 1];
        let n = loop {
            match r.read(&mut buf) {
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        };
        if n == 0 {
            if first {
                return Ok(None);
            }
            return Err(Error::InvalidInput(
                "stream ends in the middle of a vbyte number".into(),
            ));
        }
        first = false;

        let b = buf[0];
        if b < 0x80 {
            if shift == 63 && b > 1 {
                return Err(Error::InvalidInput(
                    "vbyte number does not fit into 64 bits".into(),
                ));
            }
            return Ok(Some(value | ((b as u64) << shift)));
        }
        value |= ((b & 0x7f) as u64) << shift;
        shift += 7;
        if shift >= max_bits {
            return Err(Error::InvalidInput(format!(
                "vbyte number does not terminate within {} bits",
                max_bits
            )));
        }
    }
}
