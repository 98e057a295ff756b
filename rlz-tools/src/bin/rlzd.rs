// Copyright 2025 Karpeles Lab Inc.
// RLZ decompression command-line tool

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use minrlz::{Decoder, Dict, Format, Symbol, TokenReader};

#[derive(Parser)]
#[command(name = "rlzd")]
#[command(about = "Decompress Relative Lempel-Ziv data made by rlzc", long_about = None)]
#[command(version)]
struct Args {
    /// Compressed input file (phrase stream)
    input: PathBuf,

    /// Dictionary the input was compressed against
    #[arg(short = 'd', long, alias = "dict")]
    dictionary: PathBuf,

    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Bit width of dictionary and output symbols
    #[arg(short = 'w', long, default_value_t = 8)]
    width: u32,

    /// Phrase input format: 32x2, 64x2, ascii or vbyte
    #[arg(short = 'f', long, default_value = "32x2")]
    format: String,

    /// Start decompression at output symbol A (1-based, inclusive; 0 = begin)
    #[arg(short = 'a', long = "from", default_value_t = 0)]
    from: u64,

    /// Stop decompression at output symbol B (1-based, inclusive; 0 = end)
    #[arg(short = 'b', long = "to", default_value_t = 0)]
    to: u64,

    /// No output unless an error occurs
    #[arg(short = 'q', long)]
    quiet: bool,
}

const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_BUG: i32 = 33;
const EXIT_USER_ERROR: i32 = 63;

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(&args) {
        eprintln!("rlzd: {:#}", err);
        process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<minrlz::Error>() {
        Some(minrlz::Error::Io(_)) | Some(minrlz::Error::InvalidInput(_)) => EXIT_INVALID_INPUT,
        Some(minrlz::Error::CorruptSuffixArray { .. }) | Some(minrlz::Error::Bug(_)) => EXIT_BUG,
        Some(minrlz::Error::FormatMismatch { .. }) => EXIT_USER_ERROR,
        None => EXIT_USER_ERROR,
    }
}

fn run(args: &Args) -> Result<()> {
    let format: Format = args
        .format
        .parse()
        .map_err(|msg: String| anyhow::anyhow!(msg))?;

    if !matches!(args.width, 8 | 16 | 32 | 64) {
        anyhow::bail!("width must be 8, 16, 32 or 64");
    }
    if args.from > args.to && args.to > 0 {
        anyhow::bail!("--from was greater than --to");
    }

    if !args.quiet {
        eprintln!(
            "rlzd: {} ({}) + {} ({}-bit) -> {}",
            args.input.display(),
            format,
            args.dictionary.display(),
            args.width,
            args.output.display()
        );
    }

    match args.width {
        8 => run_unparse::<u8>(args, format),
        16 => run_unparse::<u16>(args, format),
        32 => run_unparse::<u32>(args, format),
        64 => run_unparse::<u64>(args, format),
        _ => unreachable!(),
    }
}

fn run_unparse<T: Symbol>(args: &Args, format: Format) -> Result<()> {
    let dict = Dict::<T>::open(&args.dictionary)
        .with_context(|| format!("failed to load dictionary {}", args.dictionary.display()))?;

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open input file {}", args.input.display()))?;
    let mut reader = TokenReader::new(BufReader::new(input), format);

    let out = File::create(&args.output)
        .with_context(|| format!("failed to create output file {}", args.output.display()))?;
    let mut out = BufWriter::new(out);

    let stats = Decoder::with_window(&dict, args.from, args.to).decode(&mut reader, &mut out)?;

    if !args.quiet {
        eprintln!(
            "{}: {} tokens unparsed into {} symbols = {} bytes",
            args.input.display(),
            stats.tokens,
            stats.symbols_out,
            stats.symbols_out * T::BYTES as u64
        );
    }

    Ok(())
}
