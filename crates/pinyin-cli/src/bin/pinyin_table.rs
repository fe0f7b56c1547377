// pinyin-table: Build a word and character pinyin table from a dictionary.
//
// Reads a StarDict dictionary (or a tab-separated file), counts character
// frequencies in a corpus and writes one record per word or character.
//
// Usage:
//   pinyin-table -d DICT [-c CORPUS] [-o OUTPUT] [--format pipe|jsonl]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pinyin_table::source;
use pinyin_table::{
    CorpusCounter, OutputFormat, OverrideTable, TableBuilder, TableOptions, TieBreak,
};
use tracing::info;

/// Build a word and character pinyin table from a bilingual dictionary.
#[derive(Parser, Debug)]
#[command(name = "pinyin-table", version, long_about = None)]
struct Args {
    /// Dictionary: StarDict `.ifo` or base path, or a `.tsv` file.
    /// Relative paths are also looked up in $PINYIN_TABLE_DATA.
    #[arg(short, long, value_name = "PATH")]
    dict: PathBuf,

    /// Text counted for character frequencies
    /// [default: the StarDict `.dict` file]
    #[arg(short, long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    /// Extra `word<TAB>transcription` overrides, on top of the built-in ones
    #[arg(long, value_name = "PATH")]
    overrides: Option<PathBuf>,

    /// Output file [default: stdout]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output record format
    #[arg(long, default_value = "pipe", value_name = "pipe|jsonl")]
    format: OutputFormat,

    /// Tie-break between equally frequent readings of a character
    #[arg(long, value_name = "lexicographic|first-seen")]
    tie_break: Option<TieBreak>,

    /// Use headwords and transcriptions as read, without cleaning
    #[arg(long)]
    no_normalize: bool,

    /// JSON file with table options; explicit flags take precedence
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log every rejected entry
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn table_options(&self) -> Result<TableOptions> {
        let mut options = match &self.config {
            Some(path) => TableOptions::from_file(path)?,
            None => TableOptions::default(),
        };
        if let Some(tie_break) = self.tie_break {
            options.tie_break = tie_break;
        }
        if self.no_normalize {
            options.normalize = false;
        }
        Ok(options)
    }

    fn override_table(&self) -> Result<OverrideTable> {
        let mut overrides = OverrideTable::builtin();
        if let Some(path) = &self.overrides {
            overrides.extend_from_file(path)?;
            info!(path = %path.display(), total = overrides.len(), "overrides loaded");
        }
        Ok(overrides)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    pinyin_cli::init_tracing(args.verbose, args.quiet);

    let options = args.table_options()?;
    let overrides = args.override_table()?;

    let dict = pinyin_cli::locate_dictionary(&args.dict)?;
    let dictionary = source::open(&dict)
        .with_context(|| format!("failed to open dictionary {}", dict.display()))?;
    let corpus_path = args
        .corpus
        .clone()
        .or_else(|| source::default_corpus(&dict))
        .context("--corpus is required for tab-separated dictionaries")?;
    let corpus = CorpusCounter::from_file(&corpus_path).context("failed to count corpus")?;

    let table = TableBuilder::new(corpus)
        .with_overrides(overrides)
        .with_options(options)
        .build(dictionary)
        .context("failed to build table")?;

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            table.write(BufWriter::new(file), args.format)?
        }
        None => table.write(BufWriter::new(io::stdout().lock()), args.format)?,
    };
    info!(entries = written, "table written");

    Ok(())
}
