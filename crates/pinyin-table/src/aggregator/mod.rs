// Dictionary aggregation -- ingestion, reading resolution, single-character pass
//
// The aggregator owns the word table. It is written in two phases, strictly
// in this order:
// 1. Ingestion: validated (word, transcription) pairs, first accepted wins.
// 2. Single-character pass: every character with a dominant reading gets its
//    own entry, overwriting whatever ingestion stored under that key.
// Per-character candidates are collected between the two phases from the
// full ingested table and dropped once resolved.

pub mod candidates;

use hashbrown::HashMap;
use pinyin_core::Entry;
use pinyin_core::TokenError;
use pinyin_core::token::{aligned, check_alignment};

use crate::corpus::CorpusCounter;

pub use candidates::{Candidate, CandidateTable, TieBreak};

/// Punctuation that separates independent words inside one headword, with a
/// matching separator in the transcription.
pub const WORD_SEPARATORS: &[char] = &['，', ',', '﹐', '·', '、', '—', ';'];

// ---------------------------------------------------------------------------
// Rejects
// ---------------------------------------------------------------------------

/// Why an ingested line or pair contributes nothing.
///
/// These are never fatal; the caller logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Reject {
    /// Headword and transcription split into a different number of words.
    #[error("{words} word segments but {transcriptions} transcription segments")]
    SegmentCountMismatch { words: usize, transcriptions: usize },

    /// The transcription is empty or has a character outside the grammar.
    #[error("invalid transcription: {0}")]
    InvalidToken(TokenError),

    /// Character count and token count differ.
    #[error("word has {chars} characters but transcription has {tokens} tokens")]
    LengthMismatch { chars: usize, tokens: usize },

    /// An entry for this word was accepted earlier.
    #[error("word already ingested")]
    Duplicate,
}

impl From<TokenError> for Reject {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::LengthMismatch { chars, tokens } => Reject::LengthMismatch { chars, tokens },
            other => Reject::InvalidToken(other),
        }
    }
}

/// Counters for one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Lines offered to [`DictionaryAggregator::ingest`] or
    /// [`DictionaryAggregator::ingest_verified`].
    pub lines: usize,
    /// Lines that took the verified-override path.
    pub verified: usize,
    /// Pairs stored in the word table.
    pub accepted: usize,
    pub segment_mismatches: usize,
    pub invalid_tokens: usize,
    pub length_mismatches: usize,
    pub duplicates: usize,
    /// Characters that received a dominant reading.
    pub characters_resolved: usize,
    /// Single-character entries that replaced an ingested entry.
    pub overwritten: usize,
}

impl IngestStats {
    fn count_reject(&mut self, reject: &Reject) {
        match reject {
            Reject::SegmentCountMismatch { .. } => self.segment_mismatches += 1,
            Reject::InvalidToken(_) => self.invalid_tokens += 1,
            Reject::LengthMismatch { .. } => self.length_mismatches += 1,
            Reject::Duplicate => self.duplicates += 1,
        }
    }

    /// Total number of rejected lines and pairs.
    pub fn rejected(&self) -> usize {
        self.segment_mismatches + self.invalid_tokens + self.length_mismatches + self.duplicates
    }
}

// ---------------------------------------------------------------------------
// Word-separator split
// ---------------------------------------------------------------------------

/// Split on [`WORD_SEPARATORS`], dropping trailing empty pieces.
///
/// Pieces are not trimmed here, so a trailing `" "` piece survives and makes
/// the segment counts differ, exactly like a trailing word would.
pub fn split_words(s: &str) -> Vec<&str> {
    let mut pieces: Vec<&str> = s.split(WORD_SEPARATORS).collect();
    while pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    pieces
}

/// Split a headword and its transcription into aligned (word, transcription)
/// pieces, each trimmed.
pub fn split_segments<'a>(
    word: &'a str,
    transcription: &'a str,
) -> Result<Vec<(&'a str, &'a str)>, Reject> {
    let words = split_words(word);
    let transcriptions = split_words(transcription);
    if words.len() != transcriptions.len() {
        return Err(Reject::SegmentCountMismatch {
            words: words.len(),
            transcriptions: transcriptions.len(),
        });
    }
    Ok(words
        .into_iter()
        .zip(transcriptions)
        .map(|(w, t)| (w.trim(), t.trim()))
        .collect())
}

// ---------------------------------------------------------------------------
// DictionaryAggregator
// ---------------------------------------------------------------------------

/// Builds the word table from segmented dictionary lines.
///
/// Frequencies are looked up in the corpus whenever an entry is created, so
/// the corpus must be complete before the first line is ingested.
pub struct DictionaryAggregator<'c> {
    corpus: &'c CorpusCounter,
    words: HashMap<String, Entry>,
    stats: IngestStats,
}

impl<'c> DictionaryAggregator<'c> {
    pub fn new(corpus: &'c CorpusCounter) -> Self {
        Self {
            corpus,
            words: HashMap::new(),
            stats: IngestStats::default(),
        }
    }

    /// Ingest one segmented line.
    ///
    /// Returns `Err` when the whole line is rejected, otherwise the outcome
    /// of every word piece in order.
    pub fn ingest(
        &mut self,
        word: &str,
        transcription: &str,
    ) -> Result<Vec<Result<(), Reject>>, Reject> {
        self.stats.lines += 1;
        let pieces = match split_segments(word, transcription) {
            Ok(pieces) => pieces,
            Err(reject) => {
                self.stats.count_reject(&reject);
                return Err(reject);
            }
        };

        let outcomes = pieces
            .into_iter()
            .map(|(sub_word, sub_pinyin)| {
                let outcome = check_alignment(sub_word, sub_pinyin)
                    .map_err(Reject::from)
                    .and_then(|()| self.insert_first(sub_word, sub_pinyin))
                    .map(|entry| debug_assert!(entry.is_aligned(), "{entry}"));
                if let Err(reject) = &outcome {
                    self.stats.count_reject(reject);
                }
                outcome
            })
            .collect();
        Ok(outcomes)
    }

    /// Ingest a line whose transcription comes from the override table.
    ///
    /// No split and no validation; only the first-accepted-wins rule applies.
    pub fn ingest_verified(&mut self, word: &str, transcription: &str) -> Result<(), Reject> {
        self.stats.lines += 1;
        self.stats.verified += 1;
        let outcome = self.insert_first(word, transcription).map(|_| ());
        if let Err(reject) = &outcome {
            self.stats.count_reject(reject);
        }
        outcome
    }

    fn insert_first(&mut self, word: &str, pinyin: &str) -> Result<&Entry, Reject> {
        if self.words.contains_key(word) {
            return Err(Reject::Duplicate);
        }
        let entry = self.make_entry(word, pinyin, 0);
        self.stats.accepted += 1;
        let stored: &Entry = self.words.entry(word.to_string()).or_insert(entry);
        Ok(stored)
    }

    fn make_entry(&self, word: &str, pinyin: &str, pinyin_frequency: u32) -> Entry {
        Entry::new(word, pinyin, self.corpus.frequencies(word), pinyin_frequency)
    }

    /// Collect every (character, token) pair of every ingested entry.
    ///
    /// Entries are walked in word order so first-seen tie-breaking is
    /// reproducible.
    pub fn collect_candidates(&self) -> CandidateTable {
        let mut table = CandidateTable::new();
        let mut words: Vec<&String> = self.words.keys().collect();
        words.sort_unstable();
        for word in words {
            let entry = &self.words[word];
            for (ch, token) in aligned(&entry.word, &entry.pinyin) {
                table.record(ch, token);
            }
        }
        table
    }

    /// Store the dominant reading of every character as its own entry,
    /// replacing any ingested entry under the same key.
    pub fn apply_dominant_readings(&mut self, candidates: &CandidateTable, tie_break: TieBreak) {
        for (ch, candidate) in candidates.resolve(tie_break) {
            let word = ch.to_string();
            let entry = self.make_entry(&word, &candidate.token, candidate.occurrences);
            if self.words.insert(word, entry).is_some() {
                self.stats.overwritten += 1;
            }
            self.stats.characters_resolved += 1;
        }
    }

    /// Run candidate collection and the single-character pass.
    pub fn resolve(&mut self, tie_break: TieBreak) {
        let candidates = self.collect_candidates();
        self.apply_dominant_readings(&candidates, tie_break);
    }

    /// The entry stored under `word`, if any.
    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.words.get(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// All entries, ordered by word.
    pub fn into_entries(self) -> (Vec<Entry>, IngestStats) {
        let mut entries: Vec<Entry> = self.words.into_values().collect();
        entries.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        (entries, self.stats)
    }
}
