// Copyright 2025 Karpeles Lab Inc.
// Property-based tests using proptest

use minrlz::{
    compress, decompress, Decoder, Dict, Format, SuffixArray, Token, TokenReader, TokenWriter,
};
use proptest::prelude::*;

const ALL_FORMATS: [Format; 4] = [
    Format::Fixed32,
    Format::Fixed64,
    Format::Ascii,
    Format::Vbyte,
];

fn sa_of(dict: &[u8]) -> SuffixArray<u32> {
    let mut idx: Vec<u32> = (0..dict.len() as u32).collect();
    idx.sort_by(|&a, &b| dict[a as usize..].cmp(&dict[b as usize..]));
    SuffixArray::from_entries(idx)
}

fn parse(dict: &Dict<u8>, sa: &SuffixArray<u32>, input: &[u8], format: Format) -> Vec<u8> {
    let mut stream = Vec::new();
    let mut writer = TokenWriter::new(&mut stream, format);
    compress(dict, sa, input, &mut writer).unwrap();
    stream
}

proptest! {
    #[test]
    fn prop_roundtrip_all_formats(
        dict_syms in prop::collection::vec(0u8..8, 1..128),
        input in prop::collection::vec(0u8..8, 0..256),
    ) {
        let dict = Dict::from_symbols(dict_syms.clone());
        let sa = sa_of(&dict_syms);

        for format in ALL_FORMATS {
            let stream = parse(&dict, &sa, &input, format);
            let mut reader = TokenReader::new(&stream[..], format);
            let mut out = Vec::new();
            decompress(&dict, &mut reader, &mut out).unwrap();
            prop_assert_eq!(&out, &input, "format {}", format);
        }
    }

    #[test]
    fn prop_phrases_independent_of_format(
        dict_syms in prop::collection::vec(0u8..6, 1..96),
        input in prop::collection::vec(0u8..6, 0..192),
    ) {
        let dict = Dict::from_symbols(dict_syms.clone());
        let sa = sa_of(&dict_syms);

        let mut all_tokens: Vec<Vec<Token>> = Vec::new();
        for format in ALL_FORMATS {
            let stream = parse(&dict, &sa, &input, format);
            let mut reader = TokenReader::new(&stream[..], format);
            let mut tokens = Vec::new();
            while let Some(token) = reader.next_token().unwrap() {
                tokens.push(token);
            }
            all_tokens.push(tokens);
        }
        for pair in all_tokens.windows(2) {
            prop_assert_eq!(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn prop_random_window(
        dict_syms in prop::collection::vec(0u8..4, 1..64),
        input in prop::collection::vec(0u8..4, 1..160),
        a_seed: u64,
        b_seed: u64,
    ) {
        let dict = Dict::from_symbols(dict_syms.clone());
        let sa = sa_of(&dict_syms);
        let stream = parse(&dict, &sa, &input, Format::Vbyte);

        let n = input.len() as u64;
        let a = a_seed % n + 1;
        let b = a + b_seed % (n - a + 1);

        let mut reader = TokenReader::new(&stream[..], Format::Vbyte);
        let mut out = Vec::new();
        Decoder::with_window(&dict, a, b)
            .decode(&mut reader, &mut out)
            .unwrap();
        prop_assert_eq!(&out, &input[(a - 1) as usize..b as usize]);
    }

    #[test]
    fn prop_greedy_phrases_are_maximal(
        dict_syms in prop::collection::vec(0u8..4, 1..48),
        input in prop::collection::vec(0u8..4, 0..96),
    ) {
        let dict = Dict::from_symbols(dict_syms.clone());
        let sa = sa_of(&dict_syms);
        let stream = parse(&dict, &sa, &input, Format::Fixed64);

        let mut reader = TokenReader::new(&stream[..], Format::Fixed64);
        let mut offset = 0usize;
        while let Some(token) = reader.next_token().unwrap() {
            let len = token.output_len() as usize;
            if !token.is_literal() {
                // the phrase must reproduce the input slice it was cut from
                let pos = token.pos as usize;
                prop_assert_eq!(
                    &dict_syms[pos..pos + len],
                    &input[offset..offset + len]
                );
                // and no dictionary position may extend it by one symbol
                if offset + len < input.len() {
                    let longer = &input[offset..offset + len + 1];
                    let extendable = dict_syms
                        .windows(longer.len())
                        .any(|w| w == longer);
                    prop_assert!(!extendable, "phrase at offset {} not maximal", offset);
                }
            }
            offset += len;
        }
        prop_assert_eq!(offset, input.len());
    }

    #[test]
    fn prop_literals_only_for_absent_symbols(
        dict_syms in prop::collection::vec(0u8..16, 1..64),
        input in prop::collection::vec(0u8..32, 0..128),
    ) {
        let dict = Dict::from_symbols(dict_syms.clone());
        let sa = sa_of(&dict_syms);
        let stream = parse(&dict, &sa, &input, Format::Fixed32);

        let mut reader = TokenReader::new(&stream[..], Format::Fixed32);
        while let Some(token) = reader.next_token().unwrap() {
            if token.is_literal() {
                prop_assert!(!dict_syms.contains(&(token.pos as u8)));
            }
        }
    }

    #[test]
    fn prop_decode_arbitrary_bytes_never_panics(
        dict_syms in prop::collection::vec(any::<u8>(), 0..64),
        stream in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let dict = Dict::from_symbols(dict_syms);
        for format in ALL_FORMATS {
            let mut reader = TokenReader::new(&stream[..], format);
            let mut out = Vec::new();
            // arbitrary bytes may or may not decode; they must never panic
            let _ = decompress(&dict, &mut reader, &mut out);
        }
    }
}
