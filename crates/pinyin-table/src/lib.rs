// pinyin-table -- dictionary aggregation into a word and character pinyin table
//
// Stages, in order:
//   source -> normalizer -> overrides / segmenter -> aggregator -> emitter
//
// `pipeline::TableBuilder` wires them together; every stage is also usable
// on its own.

pub mod aggregator;
pub mod config;
pub mod corpus;
pub mod emitter;
pub mod normalizer;
pub mod overrides;
pub mod pipeline;
pub mod segmenter;
pub mod source;

use std::path::PathBuf;

pub use aggregator::{DictionaryAggregator, IngestStats, Reject, TieBreak};
pub use config::TableOptions;
pub use corpus::CorpusCounter;
pub use emitter::{OutputFormat, write_entries};
pub use overrides::OverrideTable;
pub use pipeline::{PinyinTable, TableBuilder};
pub use segmenter::{segment, separate};
pub use source::{DictionarySource, RawEntry, SourceError};

/// Fatal errors of a table build.
///
/// Per-entry problems are not errors; they are [`Reject`]s and only counted.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("override table line {line}: {reason}")]
    OverrideParse { line: usize, reason: String },

    #[error("invalid options in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write table: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to encode entry: {0}")]
    Json(#[from] serde_json::Error),
}
