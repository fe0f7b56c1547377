// Table pipeline -- runs every stage over one dictionary source
//
// normalize -> override lookup or segmentation -> ingest -> single-character
// pass -> sorted entries. Rejected entries are logged at debug level and
// counted; only source and I/O failures abort the build.

use std::io::Write;

use pinyin_core::Entry;
use tracing::{debug, info};

use crate::TableError;
use crate::aggregator::{DictionaryAggregator, IngestStats};
use crate::config::TableOptions;
use crate::corpus::CorpusCounter;
use crate::emitter::{OutputFormat, write_entries};
use crate::normalizer::{DictionaryNormalizer, Normalized, Normalizer, VerbatimNormalizer};
use crate::overrides::OverrideTable;
use crate::segmenter::segment;
use crate::source::DictionarySource;

// ---------------------------------------------------------------------------
// Prepared lines
// ---------------------------------------------------------------------------

/// A dictionary line after normalization, ready for the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// Transcription taken from the override table.
    Verified { word: String, transcription: String },
    /// Transcription produced by the segmenter.
    Segmented { word: String, transcription: String },
}

impl Prepared {
    pub fn word(&self) -> &str {
        match self {
            Prepared::Verified { word, .. } | Prepared::Segmented { word, .. } => word,
        }
    }

    pub fn transcription(&self) -> &str {
        match self {
            Prepared::Verified { transcription, .. }
            | Prepared::Segmented { transcription, .. } => transcription,
        }
    }
}

// ---------------------------------------------------------------------------
// TableBuilder
// ---------------------------------------------------------------------------

/// Owns the corpus, the override table and the options for one build.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    corpus: CorpusCounter,
    overrides: OverrideTable,
    options: TableOptions,
}

impl TableBuilder {
    /// A builder with the built-in overrides and default options.
    pub fn new(corpus: CorpusCounter) -> Self {
        Self {
            corpus,
            overrides: OverrideTable::builtin(),
            options: TableOptions::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn corpus(&self) -> &CorpusCounter {
        &self.corpus
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Normalize one raw entry and pick its transcription: the override if
    /// the cleaned headword has one, the segmenter's output otherwise.
    pub fn prepare(&self, headword: &str, definition: &str) -> Prepared {
        let Normalized {
            word,
            transcription,
        } = if self.options.normalize {
            DictionaryNormalizer.normalize(headword, definition)
        } else {
            VerbatimNormalizer.normalize(headword, definition)
        };

        match self.overrides.get(&word) {
            Some(verified) => Prepared::Verified {
                transcription: verified.to_string(),
                word,
            },
            None => Prepared::Segmented {
                transcription: segment(&transcription),
                word,
            },
        }
    }

    /// Run every stage over `source`.
    ///
    /// The first source error aborts the build; nothing is returned for it.
    pub fn build<S: DictionarySource>(&self, source: S) -> Result<PinyinTable, TableError> {
        let mut aggregator = DictionaryAggregator::new(&self.corpus);

        for raw in source {
            let raw = raw?;
            match self.prepare(&raw.headword, &raw.definition) {
                Prepared::Verified {
                    word,
                    transcription,
                } => {
                    if let Err(reject) = aggregator.ingest_verified(&word, &transcription) {
                        debug!(%word, %transcription, %reject, "override skipped");
                    }
                }
                Prepared::Segmented {
                    word,
                    transcription,
                } => match aggregator.ingest(&word, &transcription) {
                    Err(reject) => debug!(%word, %transcription, %reject, "line rejected"),
                    Ok(outcomes) => {
                        for reject in outcomes.into_iter().filter_map(Result::err) {
                            debug!(%word, %transcription, %reject, "word rejected");
                        }
                    }
                },
            }
        }

        if self.options.single_char_override {
            aggregator.resolve(self.options.tie_break);
        }

        let (entries, stats) = aggregator.into_entries();
        info!(
            lines = stats.lines,
            accepted = stats.accepted,
            rejected = stats.rejected(),
            characters = stats.characters_resolved,
            entries = entries.len(),
            "table built"
        );
        Ok(PinyinTable { entries, stats })
    }
}

// ---------------------------------------------------------------------------
// PinyinTable
// ---------------------------------------------------------------------------

/// The finished table: entries sorted by word, plus the run's counters.
#[derive(Debug, Clone, Default)]
pub struct PinyinTable {
    entries: Vec<Entry>,
    stats: IngestStats,
}

impl PinyinTable {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up one word.
    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.entries
            .binary_search_by(|e| e.word.as_str().cmp(word))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Write every entry in `format`. Returns the number of lines written.
    pub fn write<W: Write>(&self, out: W, format: OutputFormat) -> Result<usize, TableError> {
        write_entries(out, &self.entries, format)
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::TieBreak;
    use crate::source::{MemorySource, RawEntry, SourceError};

    fn builder(corpus: &str) -> TableBuilder {
        TableBuilder::new(CorpusCounter::from_text(corpus))
    }

    #[test]
    fn prepare_segments_unspaced() {
        let prepared = builder("").prepare("报告", "bàogào\nreport");
        assert_eq!(
            prepared,
            Prepared::Segmented {
                word: "报告".to_string(),
                transcription: "bào gào".to_string(),
            }
        );
    }

    #[test]
    fn prepare_uses_override() {
        let prepared = builder("").prepare("䦆头", "juétou");
        assert_eq!(prepared.word(), "䦆头");
        assert_eq!(prepared.transcription(), "jué tóu");
        assert!(matches!(prepared, Prepared::Verified { .. }));
    }

    #[test]
    fn prepare_override_matches_cleaned_headword() {
        let prepared = builder("").prepare("《令人注目》", "whatever");
        assert_eq!(prepared.transcription(), "lìng rén zhù mù");
    }

    #[test]
    fn prepare_verbatim() {
        let options = TableOptions {
            normalize: false,
            ..TableOptions::default()
        };
        let prepared = builder("")
            .with_options(options)
            .prepare("报 告", "Bào gào");
        assert_eq!(prepared.word(), "报 告");
        assert_eq!(prepared.transcription(), "Bào gào");
    }

    #[test]
    fn build_report_example() {
        let source = MemorySource::from_pairs([("报告", "bào gào\nnotes...")]);
        let table = builder("报告").build(source).unwrap();
        let lines: Vec<String> = table.entries().iter().map(Entry::to_string).collect();
        assert_eq!(lines, ["告|gào|1|0", "报|bào|1|0", "报告|bào gào|1,1|0"]);
        assert_eq!(table.stats().accepted, 1);
        assert_eq!(table.stats().characters_resolved, 2);
    }

    #[test]
    fn build_without_character_pass() {
        let options = TableOptions {
            single_char_override: false,
            ..TableOptions::default()
        };
        let source = MemorySource::from_pairs([("报告", "bào gào")]);
        let table = builder("").with_options(options).build(source).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("报").is_none());
    }

    #[test]
    fn build_counts_rejects() {
        let source = MemorySource::from_pairs([
            ("报告", "bào gào"),
            ("报告", "bàogao"),
            ("报告书", "bào gào"),
            ("山，水", "shān"),
        ]);
        let table = builder("").build(source).unwrap();
        let stats = table.stats();
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.length_mismatches, 1);
        assert_eq!(stats.segment_mismatches, 1);
        assert_eq!(stats.rejected(), 3);
    }

    #[test]
    fn build_dominant_reading() {
        let source = MemorySource::from_pairs([
            ("长大", "zhǎng dà"),
            ("长城", "cháng chéng"),
            ("长江", "cháng jiāng"),
        ]);
        let table = builder("").build(source).unwrap();
        let entry = table.get("长").unwrap();
        assert_eq!(entry.pinyin, "cháng");
        assert_eq!(entry.pinyin_frequency, 1);
    }

    #[test]
    fn build_tie_break_option() {
        let source = || MemorySource::from_pairs([("行人", "xíng rén"), ("银行", "yín háng")]);
        let lexicographic = builder("").build(source()).unwrap();
        assert_eq!(lexicographic.get("行").unwrap().pinyin, "háng");

        let options = TableOptions {
            tie_break: TieBreak::FirstSeen,
            ..TableOptions::default()
        };
        let first_seen = builder("")
            .with_options(options)
            .build(source())
            .unwrap();
        // Words are walked in sorted order: 行人 before 银行.
        assert_eq!(first_seen.get("行").unwrap().pinyin, "xíng");
    }

    #[test]
    fn build_stops_on_source_error() {
        let source = vec![
            Ok(RawEntry::new("报告", "bào gào")),
            Err(SourceError::Malformed {
                line: 2,
                reason: "broken".to_string(),
            }),
        ]
        .into_iter();
        let err = builder("").build(source).unwrap_err();
        assert!(matches!(err, TableError::Source(SourceError::Malformed { .. })));
    }

    #[test]
    fn write_pipe() {
        let source = MemorySource::from_pairs([("报告", "bào gào")]);
        let table = builder("报").build(source).unwrap();
        let mut buf = Vec::new();
        assert_eq!(table.write(&mut buf, OutputFormat::Pipe).unwrap(), 3);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "告|gào|0|0\n报|bào|1|0\n报告|bào gào|1,0|0\n"
        );
    }
}
