// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Symbol-at-a-time input stream with one symbol of pushback.

use std::io::{ErrorKind, Read};

use crate::error::Result;
use crate::symbol::Symbol;

/// Sequential reader over the input text, delivering one W-bit symbol per
/// call with exactly one symbol of pushback.
///
/// The parser reads one symbol past the end of every completed match; the
/// pushback slot lets the next phrase start with that symbol. The slot lives
/// here rather than relying on any unread facility of the underlying stream,
/// which could not hold back more than one byte of a multi-byte symbol.
///
/// Wrap files in a `BufReader`; this reader issues small reads.
pub struct SymbolSource<T: Symbol, R: Read> {
    inner: R,
    pushed: Option<T>,
    hit_eof: bool,
}

impl<T: Symbol, R: Read> SymbolSource<T, R> {
    pub fn new(inner: R) -> Self {
        SymbolSource {
            inner,
            pushed: None,
            hit_eof: false,
        }
    }

    /// The next symbol, or `None` once the source is exhausted. A trailing
    /// partial symbol is dropped with a warning.
    pub fn next(&mut self) -> Result<Option<T>> {
        if let Some(sym) = self.pushed.take() {
            return Ok(Some(sym));
        }

        let mut buf = [0u8; 8];
        let want = &mut buf[..T::BYTES];
        let mut got = 0;
        while got < want.len() {
            match self.inner.read(&mut want[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }

        if got == 0 {
            self.hit_eof = true;
            return Ok(None);
        }
        if got < T::BYTES {
            log::warn!(
                "input size is indivisible by {}; ignoring {} trailing bytes",
                T::BYTES,
                got
            );
            self.hit_eof = true;
            return Ok(None);
        }
        Ok(Some(T::from_le(&buf[..T::BYTES])))
    }

    /// Push the symbol most recently returned by `next` back into the
    /// stream. At most one symbol may be held between `next` calls.
    pub fn unget(&mut self, sym: T) {
        debug_assert!(self.pushed.is_none(), "double unget");
        self.pushed = Some(sym);
    }

    /// True once the underlying source is exhausted and no pushback is held.
    pub fn is_eof(&self) -> bool {
        self.hit_eof && self.pushed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_next_and_eof() {
        let mut src = SymbolSource::<u8, _>::new(Cursor::new(b"ab".to_vec()));
        assert_eq!(src.next().unwrap(), Some(b'a'));
        assert_eq!(src.next().unwrap(), Some(b'b'));
        assert!(!src.is_eof());
        assert_eq!(src.next().unwrap(), None);
        assert!(src.is_eof());
    }

    #[test]
    fn test_unget() {
        let mut src = SymbolSource::<u8, _>::new(Cursor::new(b"xy".to_vec()));
        let first = src.next().unwrap().unwrap();
        src.unget(first);
        assert!(!src.is_eof());
        assert_eq!(src.next().unwrap(), Some(b'x'));
        assert_eq!(src.next().unwrap(), Some(b'y'));
        assert_eq!(src.next().unwrap(), None);
    }

    #[test]
    fn test_unget_at_eof() {
        let mut src = SymbolSource::<u8, _>::new(Cursor::new(b"z".to_vec()));
        let sym = src.next().unwrap().unwrap();
        assert_eq!(src.next().unwrap(), None);
        src.unget(sym);
        assert!(!src.is_eof());
        assert_eq!(src.next().unwrap(), Some(b'z'));
        assert_eq!(src.next().unwrap(), None);
        assert!(src.is_eof());
    }

    #[test]
    fn test_wide_symbols_little_endian() {
        let mut src = SymbolSource::<u16, _>::new(Cursor::new(vec![0x01, 0x02, 0x03, 0x04]));
        assert_eq!(src.next().unwrap(), Some(0x0201));
        assert_eq!(src.next().unwrap(), Some(0x0403));
        assert_eq!(src.next().unwrap(), None);
    }

    #[test]
    fn test_partial_trailing_symbol_dropped() {
        let mut src = SymbolSource::<u32, _>::new(Cursor::new(vec![1, 0, 0, 0, 9, 9]));
        assert_eq!(src.next().unwrap(), Some(1));
        assert_eq!(src.next().unwrap(), None);
        assert!(src.is_eof());
    }
}
