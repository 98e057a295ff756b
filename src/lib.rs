// Copyright 2025 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! # Relative Lempel-Ziv compression
//!
//! This library compresses an input text against a fixed dictionary by
//! parsing it greedily into phrases, each referring to the longest matching
//! substring of the dictionary. It shines on highly self-similar data:
//! collections of near-duplicate documents, genome sets, version histories.
//!
//! Compression needs the dictionary and a suffix array over it (built by an
//! external tool); decompression needs only the dictionary and supports
//! random access, reconstructing any window of the text without touching
//! the phrases before or after it.
//!
//! The phrase stream is raw, with no header or checksums; symbol width,
//! suffix-array width and phrase format travel out of band.
//!
//! ## Example
//!
//! ```rust
//! use minrlz::{compress, decompress, Dict, Format, SuffixArray, TokenReader, TokenWriter};
//!
//! let dict = Dict::<u8>::from_bytes(b"ababab");
//! // suffix array of "ababab", as an external tool would produce it
//! let sa = SuffixArray::<u32>::from_entries(vec![4, 2, 0, 5, 3, 1]);
//!
//! let mut stream = Vec::new();
//! let mut writer = TokenWriter::new(&mut stream, Format::Vbyte);
//! compress(&dict, &sa, &b"abacab"[..], &mut writer).unwrap();
//!
//! let mut reader = TokenReader::new(&stream[..], Format::Vbyte);
//! let mut text = Vec::new();
//! decompress(&dict, &mut reader, &mut text).unwrap();
//! assert_eq!(text, b"abacab");
//! ```

mod decode;
mod dict;
mod encode;
mod error;
mod index;
mod reader;
mod source;
mod symbol;
mod token;
mod varint;
mod writer;

pub use decode::{decompress, DecodeStats, Decoder};
pub use dict::Dict;
pub use encode::{compress, EncodeStats, Encoder};
pub use error::{Error, Result};
pub use index::{search_left, search_right, SuffixArray};
pub use reader::TokenReader;
pub use source::SymbolSource;
pub use symbol::{SaIndex, Symbol};
pub use token::{Format, Token};
pub use writer::TokenWriter;
