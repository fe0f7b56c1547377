// pinyin-separate: Insert syllable boundaries into pinyin transcriptions.
//
// Segments each TRANSCRIPTION argument, or every stdin line when none are
// given, and prints one result per line.
//
// Usage:
//   pinyin-separate [--raw] [--clean] [TRANSCRIPTION...]

use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use pinyin_core::token::validate_transcription;
use pinyin_table::normalizer::normalize_transcription;
use pinyin_table::{segment, separate};
use tracing::warn;

/// Insert syllable boundaries into unspaced pinyin.
#[derive(Parser, Debug)]
#[command(name = "pinyin-separate", version, long_about = None)]
struct Args {
    /// Transcriptions to segment; reads stdin when empty
    #[arg(value_name = "TRANSCRIPTION")]
    transcriptions: Vec<String>,

    /// Keep doubled boundaries instead of collapsing them
    #[arg(long)]
    raw: bool,

    /// Clean each input like a dictionary definition line first
    #[arg(long)]
    clean: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn process(&self, input: &str) -> String {
        let input = if self.clean {
            normalize_transcription(input)
        } else {
            input.to_string()
        };
        let output = if self.raw {
            separate(&input)
        } else {
            segment(&input)
        };
        if let Err(err) = validate_transcription(&output) {
            warn!(input = %input, output = %output, %err, "not a valid transcription");
        }
        output
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    pinyin_cli::init_tracing(args.verbose, args.quiet);

    let mut out = BufWriter::new(io::stdout().lock());

    if args.transcriptions.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            writeln!(out, "{}", args.process(&line))?;
        }
    } else {
        for transcription in &args.transcriptions {
            writeln!(out, "{}", args.process(transcription))?;
        }
    }

    out.flush()?;
    Ok(())
}
