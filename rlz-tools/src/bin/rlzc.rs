// Copyright 2025 Karpeles Lab Inc.
// RLZ compression command-line tool

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use minrlz::{
    Dict, EncodeStats, Encoder, Format, SaIndex, SuffixArray, Symbol, SymbolSource, TokenWriter,
};

#[derive(Parser)]
#[command(name = "rlzc")]
#[command(about = "Compress against a dictionary with the Relative Lempel-Ziv algorithm", long_about = None)]
#[command(version)]
struct Args {
    /// Input file to compress
    input: PathBuf,

    /// Dictionary file
    #[arg(short = 'd', long, alias = "dict")]
    dictionary: PathBuf,

    /// Suffix array over the dictionary, made by an external tool
    #[arg(short = 's', long, alias = "sa")]
    suffix_array: PathBuf,

    /// Output file (defaults to INPUT.rlz)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Process input and dictionary as 8/16/32/64-bit symbols
    #[arg(short = 'w', long, default_value_t = 8)]
    width: u32,

    /// Suffix array entries are 32- or 64-bit integers
    #[arg(short = 'W', long = "sa-width", default_value_t = 32)]
    sa_width: u32,

    /// Phrase output format: 32x2, 64x2, ascii or vbyte
    #[arg(short = 'f', long, default_value = "32x2")]
    format: String,

    /// No output unless an error occurs
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Show a progress bar while parsing
    #[arg(long)]
    progress: bool,
}

const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_BUG: i32 = 33;
const EXIT_USER_ERROR: i32 = 63;

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(&args) {
        eprintln!("rlzc: {:#}", err);
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
    if !matches!(args.sa_width, 32 | 64) {
        anyhow::bail!("suffix array width must be 32 or 64");
    }

    // These combinations cannot mix safely, so say so up front.
    if format == Format::Fixed32 && args.width == 64 && !args.quiet {
        eprintln!(
            "Warning: with -f 32x2 and -w 64 the output cannot hold every literal; \
             a symbol missing from the dictionary will abort. Use -f 64x2 if unsure."
        );
    }
    if format == Format::Fixed32 && args.sa_width == 64 && !args.quiet {
        eprintln!(
            "Warning: -W 64 with -f 32x2 only works while the dictionary stays \
             below 2^32 symbols; use -f 64x2 for bigger dictionaries."
        );
    }

    match (args.width, args.sa_width) {
        (8, 32) => run_parse::<u8, u32>(args, format),
        (8, 64) => run_parse::<u8, u64>(args, format),
        (16, 32) => run_parse::<u16, u32>(args, format),
        (16, 64) => run_parse::<u16, u64>(args, format),
        (32, 32) => run_parse::<u32, u32>(args, format),
        (32, 64) => run_parse::<u32, u64>(args, format),
        (64, 32) => run_parse::<u64, u32>(args, format),
        (64, 64) => run_parse::<u64, u64>(args, format),
        _ => unreachable!(),
    }
}

fn run_parse<T: Symbol, S: SaIndex>(args: &Args, format: Format) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| {
        let mut name = args.input.clone().into_os_string();
        name.push(".rlz");
        PathBuf::from(name)
    });

    if !args.quiet {
        eprintln!(
            "rlzc: {} ({}-bit) -> {} ({})",
            args.input.display(),
            args.width,
            output.display(),
            format
        );
    }

    let dict = Dict::<T>::open(&args.dictionary)
        .with_context(|| format!("failed to load dictionary {}", args.dictionary.display()))?;
    let sa = SuffixArray::<S>::open(&args.suffix_array).with_context(|| {
        format!(
            "failed to load suffix array {}",
            args.suffix_array.display()
        )
    })?;

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open input file {}", args.input.display()))?;
    let input_bytes = input.metadata()?.len();

    let out = File::create(&output)
        .with_context(|| format!("failed to create output file {}", output.display()))?;
    let mut writer = TokenWriter::new(BufWriter::new(out), format);

    let pb = if args.progress {
        let pb = ProgressBar::new(input_bytes);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut encoder = Encoder::new(&dict, &sa, SymbolSource::new(BufReader::new(input)));
    let mut stats = EncodeStats::default();
    while let Some(token) = encoder.next_token()? {
        writer.write_token(token)?;
        let emitted = token.output_len();
        stats.tokens += 1;
        stats.symbols_in += emitted;
        if emitted > stats.longest {
            stats.longest = emitted;
        }
        if let Some(pb) = &pb {
            pb.set_position(stats.symbols_in * T::BYTES as u64);
        }
    }
    writer.flush()?;
    if let Some(pb) = pb {
        pb.finish();
    }

    if !args.quiet {
        let in_bytes = stats.symbols_in * T::BYTES as u64;
        let mean = if stats.tokens > 0 {
            stats.symbols_in as f64 / stats.tokens as f64
        } else {
            0.0
        };
        // the dictionary has to ship along with the phrase stream, so it
        // counts toward the output side of the ratio
        let total_out = writer.bytes_written() + dict.len() as u64 * T::BYTES as u64;
        let ratio = if in_bytes > 0 {
            total_out as f64 / in_bytes as f64 * 100.0
        } else {
            0.0
        };
        eprintln!(
            "rlzc: {} done, {} tokens, {} bytes",
            output.display(),
            stats.tokens,
            writer.bytes_written()
        );
        eprintln!(
            "mean token length {:.2} symbols, longest {}, out/in ratio {:.2}%",
            mean, stats.longest, ratio
        );
    }

    Ok(())
}
