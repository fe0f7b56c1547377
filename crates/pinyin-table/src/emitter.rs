// Serialization of final entries

use std::io::Write;

use pinyin_core::Entry;

use crate::TableError;

/// Output record format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `word|pinyin|f1,f2,...|pinyinFrequency`, one per line.
    #[default]
    Pipe,
    /// One JSON object per line.
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipe" => Ok(Self::Pipe),
            "jsonl" => Ok(Self::Jsonl),
            other => Err(format!("unknown format {other:?} (expected pipe or jsonl)")),
        }
    }
}

/// Write every entry, one per line. Returns the number of lines written.
pub fn write_entries<W: Write>(
    mut out: W,
    entries: &[Entry],
    format: OutputFormat,
) -> Result<usize, TableError> {
    for entry in entries {
        match format {
            OutputFormat::Pipe => writeln!(out, "{entry}")?,
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut out, entry)?;
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()?;
    Ok(entries.len())
}
