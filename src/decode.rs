// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Random-access RLZ decompressor.
//!
//! Walks the phrase stream with a running output position and emits the
//! requested window of the reconstructed text. All window arithmetic is in
//! symbols; byte offsets on the output side are the symbol width times the
//! symbol count.

use std::io::{Read, Write};

use crate::dict::Dict;
use crate::error::Result;
use crate::reader::TokenReader;
use crate::symbol::Symbol;
use crate::token::Token;

/// Counters reported by a finished decompression run.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecodeStats {
    /// Phrases consumed
    pub tokens: u64,
    /// Symbols written to the output
    pub symbols_out: u64,
}

enum Step {
    Emitted(u64),
    Stop,
}

/// Decompressor over a dictionary, optionally windowed.
///
/// The window `[from, to]` is 1-based and inclusive; 0 for either bound
/// means "from the start" / "to the end". With both bounds zero the output
/// is the whole reconstructed text, bit for bit.
pub struct Decoder<'d, T: Symbol> {
    dict: &'d Dict<T>,
    from: u64,
    to: u64,
    output_pos: u64,
}

impl<'d, T: Symbol> Decoder<'d, T> {
    /// Decoder for the whole text.
    pub fn new(dict: &'d Dict<T>) -> Self {
        Self::with_window(dict, 0, 0)
    }

    /// Decoder for the window `[from, to]` of the text (1-based, inclusive,
    /// 0 meaning unbounded on that side).
    pub fn with_window(dict: &'d Dict<T>, from: u64, to: u64) -> Self {
        Decoder {
            dict,
            from,
            to,
            output_pos: 0,
        }
    }

    /// Drain the phrase stream, writing the selected window to `out`.
    ///
    /// Stops reading as soon as a phrase lies entirely past the window end.
    pub fn decode<R: Read, W: Write>(
        &mut self,
        tokens: &mut TokenReader<R>,
        out: &mut W,
    ) -> Result<DecodeStats> {
        let mut stats = DecodeStats::default();

        while let Some(token) = tokens.next_token()? {
            stats.tokens += 1;
            match self.emit(&token, out)? {
                Step::Emitted(n) => stats.symbols_out += n,
                Step::Stop => break,
            }
        }
        out.flush()?;
        Ok(stats)
    }

    /// Write the part of one phrase that intersects the window.
    fn emit<W: Write>(&mut self, token: &Token, out: &mut W) -> Result<Step> {
        let a = if self.from == 0 { 1 } else { self.from };
        let b = if self.to == 0 { u64::MAX } else { self.to };

        let len = token.output_len();
        // 1-based output positions covered by this phrase; saturation keeps
        // hostile length claims from wrapping the running position
        let first = self.output_pos.saturating_add(1);
        let last = self.output_pos.saturating_add(len);

        if first > b {
            // Entirely past the window; nothing later can intersect either.
            return Ok(Step::Stop);
        }
        if last < a {
            self.output_pos = last;
            return Ok(Step::Emitted(0));
        }

        let written;
        if token.is_literal() {
            // A literal covers one position, already known to be in window.
            T::from_u64(token.pos).put_le(out)?;
            written = 1;
        } else {
            let pos = token.pos as usize;
            let start = a.saturating_sub(first) as usize;
            let mut stop = (len - last.saturating_sub(b)) as usize;

            if pos.saturating_add(stop) > self.dict.len() {
                log::warn!(
                    "phrase ({:#x}, {:#x}) exceeds dictionary length of {}, truncating",
                    token.pos,
                    token.len,
                    self.dict.len()
                );
                stop = self.dict.len().saturating_sub(pos);
            }

            let mut n = 0u64;
            if start < stop {
                for &sym in &self.dict.as_slice()[pos + start..pos + stop] {
                    sym.put_le(out)?;
                    n += 1;
                }
            }
            written = n;
        }

        self.output_pos = last;
        Ok(Step::Emitted(written))
    }
}

/// Decompress a whole phrase stream into `out`.
///
/// Convenience wrapper over [`Decoder`] with an unbounded window.
pub fn decompress<T, R, W>(
    dict: &Dict<T>,
    tokens: &mut TokenReader<R>,
    out: &mut W,
) -> Result<DecodeStats>
where
    T: Symbol,
    R: Read,
    W: Write,
{
    Decoder::new(dict).decode(tokens, out)
}
