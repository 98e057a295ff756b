// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Greedy RLZ parser.
//!
//! The parser walks the input one symbol at a time while narrowing a
//! suffix-array interval of dictionary suffixes that match the symbols read
//! so far. When the interval cannot be narrowed any further, the longest
//! match found becomes the next phrase; a symbol that occurs nowhere in the
//! dictionary becomes a literal phrase.

use std::io::{Read, Write};

use crate::dict::Dict;
use crate::error::{Error, Result};
use crate::index::{search_left, search_right, SuffixArray};
use crate::source::SymbolSource;
use crate::symbol::{SaIndex, Symbol};
use crate::token::Token;
use crate::writer::TokenWriter;

/// Counters reported by a finished compression run.
#[derive(Debug, Default, Clone, Copy)]
pub struct EncodeStats {
    /// Phrases emitted
    pub tokens: u64,
    /// Longest phrase, in output symbols
    pub longest: u64,
    /// Input symbols consumed
    pub symbols_in: u64,
}

/// Greedy parser producing the phrase stream for one input.
///
/// Phrases are pulled with [`next_token`](Encoder::next_token) until it
/// returns `None`; the concatenation of the pulled phrases reconstructs the
/// input exactly. At every emission the phrase is a longest match: no longer
/// prefix of the remaining input occurs anywhere in the dictionary.
pub struct Encoder<'d, T: Symbol, S: SaIndex, R: Read> {
    dict: &'d Dict<T>,
    sa: &'d SuffixArray<S>,
    source: SymbolSource<T, R>,
}

impl<'d, T: Symbol, S: SaIndex, R: Read> Encoder<'d, T, S, R> {
    pub fn new(dict: &'d Dict<T>, sa: &'d SuffixArray<S>, source: SymbolSource<T, R>) -> Self {
        Encoder { dict, sa, source }
    }

    /// Find the next phrase, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        // Interval of SA indices whose suffixes match the symbols read so
        // far for this phrase; depth is how many symbols that is.
        let mut lo = 0usize;
        let mut hi = match self.sa.len().checked_sub(1) {
            Some(hi) => hi,
            // Empty dictionary or suffix array: nothing can match, so every
            // input symbol comes out as a literal.
            None => {
                return Ok(self
                    .source
                    .next()?
                    .map(|sym| Token::literal(sym.to_u64())))
            }
        };
        let mut depth = 0u64;
        // Leftmost SA index of the best match so far; None until at least
        // one symbol has matched.
        let mut best: Option<usize> = None;

        loop {
            let sym = match self.source.next()? {
                Some(sym) => sym,
                None => {
                    // Input ends here. Either we are mid-match (emit what we
                    // have, the match is maximal by construction) or this is
                    // the clean end of the phrase stream.
                    return Ok(best.map(|b| Token::phrase(self.sa.get(b), depth as i64)));
                }
            };

            let left = match search_left(self.dict, self.sa, sym, depth, lo, hi) {
                Some(left) => left,
                None => {
                    // No suffix in the interval continues with this symbol.
                    return Ok(Some(match best {
                        Some(b) => {
                            // The symbol we read belongs to the next phrase.
                            self.source.unget(sym);
                            Token::phrase(self.sa.get(b), depth as i64)
                        }
                        // depth == 0: the symbol occurs nowhere in the
                        // dictionary, encode it as a literal.
                        None => Token::literal(sym.to_u64()),
                    }));
                }
            };

            // With the left bound found, the right search can only fail when
            // the suffix array is out of order relative to the dictionary,
            // which happens with mismatched width flags or a stale array.
            let right = search_right(self.dict, self.sa, sym, depth, left, hi).ok_or(
                Error::CorruptSuffixArray {
                    sym: sym.to_u64(),
                    depth,
                    lo: left,
                    hi,
                },
            )?;

            best = Some(left);
            depth += 1;

            if left == right {
                // The interval has collapsed to a single suffix; stop
                // searching and walk it directly against the input.
                return self.extend_single(self.sa.get(left), depth);
            }

            lo = left;
            hi = right;
        }
    }

    /// Fast path once only one candidate suffix remains: compare the input
    /// against the dictionary symbol by symbol until a mismatch or EOF.
    fn extend_single(&mut self, start: u64, mut depth: u64) -> Result<Option<Token>> {
        loop {
            let sym = match self.source.next()? {
                Some(sym) => sym,
                None => return Ok(Some(Token::phrase(start, depth as i64))),
            };
            let here = (start + depth)
                .try_into()
                .ok()
                .and_then(|i: usize| self.dict.get(i));
            if here != Some(sym) {
                self.source.unget(sym);
                return Ok(Some(Token::phrase(start, depth as i64)));
            }
            depth += 1;
        }
    }
}

/// Compress a whole input into `out`, returning run counters.
///
/// Convenience wrapper over [`Encoder`]; the phrase stream written is
/// exactly the sequence of `next_token` results.
pub fn compress<T, S, R, W>(
    dict: &Dict<T>,
    sa: &SuffixArray<S>,
    input: R,
    out: &mut TokenWriter<W>,
) -> Result<EncodeStats>
where
    T: Symbol,
    S: SaIndex,
    R: Read,
    W: Write,
{
    let mut encoder = Encoder::new(dict, sa, SymbolSource::new(input));
    let mut stats = EncodeStats::default();

    while let Some(token) = encoder.next_token()? {
        out.write_token(token)?;
        let emitted = token.output_len();
        stats.tokens += 1;
        stats.symbols_in += emitted;
        if emitted > stats.longest {
            stats.longest = emitted;
        }
    }
    out.flush()?;
    Ok(stats)
}
