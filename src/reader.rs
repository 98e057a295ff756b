// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Phrase-stream reader for RLZ decompression.

use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};
use crate::token::{Format, Token};
use crate::varint::read_varint;

/// Reads phrases back out of a serialized stream.
///
/// The stream carries no metadata; the format must match what the stream was
/// written with. End of stream is signalled by source exhaustion at a phrase
/// boundary, and `next_token` then returns `None`. A partial phrase at the
/// end is `InvalidInput`.
///
/// # Example
///
/// ```
/// use minrlz::{Format, Token, TokenReader, TokenWriter};
///
/// let mut buf = Vec::new();
/// let mut writer = TokenWriter::new(&mut buf, Format::Vbyte);
/// writer.write_token(Token::phrase(0, 4)).unwrap();
/// writer.write_token(Token::literal(b'b' as u64)).unwrap();
///
/// let mut reader = TokenReader::new(&buf[..], Format::Vbyte);
/// assert_eq!(reader.next_token().unwrap(), Some(Token::phrase(0, 4)));
/// assert_eq!(reader.next_token().unwrap(), Some(Token::literal(b'b' as u64)));
/// assert_eq!(reader.next_token().unwrap(), None);
/// ```
pub struct TokenReader<R: Read> {
    inner: R,
    format: Format,
}

impl<R: Read> TokenReader<R> {
    pub fn new(inner: R, format: Format) -> Self {
        TokenReader { inner, format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Decode the next phrase, or `None` at a clean end of stream.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        match self.format {
            Format::Fixed32 => self.next_fixed32(),
            Format::Fixed64 => self.next_fixed64(),
            Format::Ascii => self.next_ascii(),
            Format::Vbyte => self.next_vbyte(),
        }
    }

    fn next_fixed32(&mut self) -> Result<Option<Token>> {
        let mut buf = [0u8; 8];
        match read_full(&mut self.inner, &mut buf)? {
            0 => Ok(None),
            8 => Ok(Some(Token {
                pos: u32::from_le_bytes(buf[0..4].try_into().unwrap()) as u64,
                len: u32::from_le_bytes(buf[4..8].try_into().unwrap()) as i64,
            })),
            n => Err(Error::InvalidInput(format!(
                "stream ends inside a 32x2 phrase ({} of 8 bytes)",
                n
            ))),
        }
    }

    fn next_fixed64(&mut self) -> Result<Option<Token>> {
        let mut buf = [0u8; 16];
        match read_full(&mut self.inner, &mut buf)? {
            0 => Ok(None),
            16 => {
                let pos = u64::from_le_bytes(buf[0..8].try_into().unwrap());
                let len = u64::from_le_bytes(buf[8..16].try_into().unwrap());
                if len > i64::MAX as u64 {
                    return Err(Error::InvalidInput(format!(
                        "phrase length {:#x} overflows the length domain",
                        len
                    )));
                }
                Ok(Some(Token {
                    pos,
                    len: len as i64,
                }))
            }
            n => Err(Error::InvalidInput(format!(
                "stream ends inside a 64x2 phrase ({} of 16 bytes)",
                n
            ))),
        }
    }

    fn next_ascii(&mut self) -> Result<Option<Token>> {
        let pos = match self.read_ascii_field()? {
            Some(field) => field,
            None => return Ok(None),
        };
        let len = match self.read_ascii_field()? {
            Some(field) => field,
            None => {
                return Err(Error::InvalidInput(
                    "stream ends after a phrase position, before its length".into(),
                ))
            }
        };

        let pos: u64 = pos
            .parse()
            .map_err(|_| Error::InvalidInput(format!("bad phrase position '{}'", pos)))?;
        let len: i64 = len
            .parse()
            .map_err(|_| Error::InvalidInput(format!("bad phrase length '{}'", len)))?;
        if len < 0 {
            return Err(Error::InvalidInput(format!(
                "negative phrase length {}",
                len
            )));
        }
        Ok(Some(Token { pos, len }))
    }

    /// One whitespace-delimited field, or `None` at end of stream.
    fn read_ascii_field(&mut self) -> Result<Option<String>> {
        let mut field = String::new();
        loop {
            let mut buf = [0u8; 1];
            match read_full(&mut self.inner, &mut buf)? {
                0 => break,
                _ => {
                    let c = buf[0];
                    if c.is_ascii_whitespace() {
                        if field.is_empty() {
                            continue;
                        }
                        break;
                    }
                    field.push(c as char);
                }
            }
        }
        if field.is_empty() {
            Ok(None)
        } else {
            Ok(Some(field))
        }
    }

    fn next_vbyte(&mut self) -> Result<Option<Token>> {
        let pos = match read_varint(&mut self.inner, 64)? {
            Some(pos) => pos,
            None => return Ok(None),
        };
        let len = match read_varint(&mut self.inner, 63)? {
            Some(len) => len,
            None => {
                return Err(Error::InvalidInput(
                    "stream ends after a phrase position, before its length".into(),
                ))
            }
        };
        Ok(Some(Token {
            pos,
            len: len as i64,
        }))
    }
}

/// Read until `buf` is full or the stream ends; returns bytes read.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut got = 0;
    while got < buf.len() {
        match r.read(&mut buf[got..]) {
            Ok(0) => break,
            Ok(n) => got += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(got)
}
