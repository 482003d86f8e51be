mod render;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sf2tree::{Decoder, DecoderSettings, Registry};
use tracing::info;

/// Prints the chunk tree and records of a SoundFont 2 file.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The SoundFont to read.
    path: PathBuf,

    /// Print only the chunk lines, not the records inside them.
    #[arg(long)]
    summary: bool,

    /// Fail on sub-chunks with unknown tags instead of skipping them.
    #[arg(long)]
    strict: bool,

    /// Expect a pad byte after every odd-length chunk.
    #[arg(long)]
    word_align: bool,

    /// The number of container levels allowed.
    #[arg(long, default_value_t = 8)]
    max_depth: usize,

    /// Log every chunk header to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let settings = DecoderSettings {
        max_depth: args.max_depth,
        word_aligned: args.word_align,
        strict: args.strict,
    };

    // Load the SoundFont.
    let file = File::open(&args.path)
        .with_context(|| format!("failed to open '{}'", args.path.display()))?;
    let mut reader = BufReader::new(file);
    info!(path = %args.path.display(), "decoding");

    let registry = Registry::standard();
    let decoder = Decoder::new(&registry, settings)?;
    let decoded = decoder
        .decode(&mut reader)
        .with_context(|| format!("failed to decode '{}'", args.path.display()))?;

    // Write the tree to stdout.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::render(&mut out, &decoded.root, args.summary)?;
    out.flush()?;

    // Skipped chunks go to stderr so they do not mix with the tree.
    for event in &decoded.events {
        eprintln!("warning: {event}");
    }
    info!(consumed = decoded.consumed, "done");

    Ok(())
}
