// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Phrase-stream writer for RLZ compression.

use std::io::Write;

use crate::error::{Error, Result};
use crate::token::{Format, Token};
use crate::varint::{encode_varint, MAX_VARINT_LEN64};

/// Serializes phrases into a byte sink.
///
/// `32x2` cannot represent positions or lengths of 2^32 and above (nor
/// literal symbol values that wide); such phrases are rejected with
/// `FormatMismatch` naming the phrase index. `64x2`, `ascii` and `vbyte`
/// cover the full domain.
pub struct TokenWriter<W: Write> {
    inner: W,
    format: Format,
    tokens: u64,
    bytes: u64,
}

impl<W: Write> TokenWriter<W> {
    pub fn new(inner: W, format: Format) -> Self {
        TokenWriter {
            inner,
            format,
            tokens: 0,
            bytes: 0,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Phrases written so far
    pub fn tokens_written(&self) -> u64 {
        self.tokens
    }

    /// Bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Serialize one phrase.
    pub fn write_token(&mut self, token: Token) -> Result<()> {
        debug_assert!(token.len >= 0, "negative phrase length");

        let written = match self.format {
            Format::Fixed32 => {
                self.check_fixed32(token.pos)?;
                self.check_fixed32(token.len as u64)?;
                self.inner.write_all(&(token.pos as u32).to_le_bytes())?;
                self.inner.write_all(&(token.len as u32).to_le_bytes())?;
                8
            }
            Format::Fixed64 => {
                self.inner.write_all(&token.pos.to_le_bytes())?;
                self.inner.write_all(&(token.len as u64).to_le_bytes())?;
                16
            }
            Format::Ascii => {
                let line = format!("{} {}\n", token.pos, token.len);
                self.inner.write_all(line.as_bytes())?;
                line.len()
            }
            Format::Vbyte => {
                let mut buf = [0u8; 2 * MAX_VARINT_LEN64];
                let mut n = encode_varint(&mut buf, token.pos);
                n += encode_varint(&mut buf[n..], token.len as u64);
                self.inner.write_all(&buf[..n])?;
                n
            }
        };

        self.tokens += 1;
        self.bytes += written as u64;
        Ok(())
    }

    fn check_fixed32(&self, value: u64) -> Result<()> {
        if value > u32::MAX as u64 {
            return Err(Error::FormatMismatch {
                phrase: self.tokens,
                value,
            });
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::TokenReader;

    fn roundtrip(format: Format, tokens: &[Token]) {
        let mut buf = Vec::new();
        let mut w = TokenWriter::new(&mut buf, format);
        for &t in tokens {
            w.write_token(t).unwrap();
        }
        let mut r = TokenReader::new(&buf[..], format);
        for &t in tokens {
            assert_eq!(r.next_token().unwrap(), Some(t), "{}", format);
        }
        assert_eq!(r.next_token().unwrap(), None, "{}", format);
    }

    #[test]
    fn test_roundtrip_all_formats() {
        let tokens = [
            Token { pos: 0, len: 6 },
            Token { pos: 0xfffffffe, len: 1 },
            Token::literal(0x62),
            Token { pos: 127, len: 128 },
        ];
        for format in [Format::Fixed32, Format::Fixed64, Format::Ascii, Format::Vbyte] {
            roundtrip(format, &tokens);
        }
    }

    #[test]
    fn test_roundtrip_wide_values() {
        let tokens = [
            Token {
                pos: 1 << 40,
                len: 5,
            },
            Token::literal(u64::MAX),
        ];
        for format in [Format::Fixed64, Format::Ascii, Format::Vbyte] {
            roundtrip(format, &tokens);
        }
    }

    #[test]
    fn test_fixed32_rejects_wide_position() {
        let mut w = TokenWriter::new(Vec::new(), Format::Fixed32);
        w.write_token(Token { pos: 1, len: 1 }).unwrap();
        let err = w
            .write_token(Token {
                pos: 1 << 32,
                len: 1,
            })
            .unwrap_err();
        match err {
            Error::FormatMismatch { phrase, value } => {
                assert_eq!(phrase, 1);
                assert_eq!(value, 1 << 32);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_fixed32_rejects_wide_literal() {
        let mut w = TokenWriter::new(Vec::new(), Format::Fixed32);
        assert!(w.write_token(Token::literal(u64::MAX)).is_err());
    }

    #[test]
    fn test_ascii_bytes() {
        let mut buf = Vec::new();
        let mut w = TokenWriter::new(&mut buf, Format::Ascii);
        w.write_token(Token { pos: 0, len: 4 }).unwrap();
        w.write_token(Token::literal(98)).unwrap();
        assert_eq!(buf, b"0 4\n98 0\n");
    }

    #[test]
    fn test_vbyte_bytes() {
        let mut buf = Vec::new();
        let mut w = TokenWriter::new(&mut buf, Format::Vbyte);
        w.write_token(Token { pos: 0, len: 4 }).unwrap();
        w.write_token(Token::literal(0x62)).unwrap();
        assert_eq!(w.tokens_written(), 2);
        assert_eq!(w.bytes_written(), 4);
        assert_eq!(buf, [0x00, 0x04, 0x62, 0x00]);
    }

    #[test]
    fn test_vbyte_multibyte() {
        let mut buf = Vec::new();
        let mut w = TokenWriter::new(&mut buf, Format::Vbyte);
        w.write_token(Token { pos: 300, len: 1 }).unwrap();
        // 300 = 0b10_0101100 -> 0xac 0x02
        assert_eq!(buf, [0xac, 0x02, 0x01]);
    }
}
