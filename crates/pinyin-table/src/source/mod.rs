// Dictionary sources -- pull iterators over raw (headword, definition) pairs
//
// A source yields entries one at a time and stops after the first error.
// Any error a source returns is fatal for the table build.

pub mod stardict;
pub mod tsv;

use std::path::{Path, PathBuf};

pub use stardict::StarDictReader;
pub use tsv::TsvSource;

/// One raw dictionary entry. The first line of `definition` is the
/// transcription; the rest is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub headword: String,
    pub definition: String,
}

impl RawEntry {
    pub fn new(headword: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            definition: definition.into(),
        }
    }
}

/// Error type for dictionary sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid .ifo header: {0}")]
    InvalidIfo(String),

    #[error("missing .ifo key {0:?}")]
    MissingIfoKey(&'static str),

    #[error("unsupported idxoffsetbits {0} (expected 32 or 64)")]
    UnsupportedOffsetBits(u32),

    #[error("truncated .idx record at byte {0}")]
    TruncatedIndex(usize),

    #[error("entry {headword:?} points outside .dict (offset {offset}, size {size})")]
    DataOutOfRange {
        headword: String,
        offset: u64,
        size: u32,
    },

    #[error("{0} is dictzip-compressed; decompress it to a plain .dict first")]
    Compressed(PathBuf),

    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(String),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Any pull-style source of raw entries.
pub trait DictionarySource: Iterator<Item = Result<RawEntry, SourceError>> {}

impl<T: Iterator<Item = Result<RawEntry, SourceError>>> DictionarySource for T {}

/// An in-memory source, mostly for tests and small fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: std::vec::IntoIter<RawEntry>,
}

impl MemorySource {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }

    /// Build from `(headword, definition)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(h, d)| RawEntry::new(h, d))
                .collect(),
        )
    }
}

impl Iterator for MemorySource {
    type Item = Result<RawEntry, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(Ok)
    }
}

/// Whether `path` names a tab-separated source (`.tsv` or `.txt`).
pub fn is_tabular(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsv") | Some("txt")
    )
}

/// The default corpus for the dictionary at `path`: the `.dict` data file
/// of a StarDict dictionary. Tabular sources have none.
pub fn default_corpus(path: &Path) -> Option<PathBuf> {
    (!is_tabular(path)).then(|| stardict::data_path(path))
}

/// Open a source by file name: tabular files are read as [`TsvSource`],
/// anything else as a StarDict base path.
pub fn open(path: &Path) -> Result<Box<dyn DictionarySource>, SourceError> {
    if is_tabular(path) {
        Ok(Box::new(TsvSource::open(path)?))
    } else {
        Ok(Box::new(StarDictReader::open(path)?))
    }
}

pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SourceError + '_ {
    move |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_yields_in_order() {
        let source = MemorySource::from_pairs([("报告", "bào gào"), ("头", "tóu")]);
        let headwords: Vec<String> = source.map(|e| e.unwrap().headword).collect();
        assert_eq!(headwords, ["报告", "头"]);
    }

    #[test]
    fn tabular_by_extension() {
        assert!(is_tabular(Path::new("dict.tsv")));
        assert!(is_tabular(Path::new("data/dict.txt")));
        assert!(!is_tabular(Path::new("data/cedict")));
        assert!(!is_tabular(Path::new("data/cedict.ifo")));
    }

    #[test]
    fn default_corpus_is_stardict_data() {
        assert_eq!(
            default_corpus(Path::new("data/cedict.ifo")),
            Some(PathBuf::from("data/cedict.dict"))
        );
        assert_eq!(
            default_corpus(Path::new("data/cedict")),
            Some(PathBuf::from("data/cedict.dict"))
        );
        assert_eq!(default_corpus(Path::new("data/cedict.tsv")), None);
    }

    #[test]
    fn open_missing_stardict() {
        let err = open(Path::new("/nonexistent/dict")).err().unwrap();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn open_missing_tsv() {
        let err = open(Path::new("/nonexistent/dict.tsv")).err().unwrap();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
