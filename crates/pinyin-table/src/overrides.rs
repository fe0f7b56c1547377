// Verified transcriptions for headwords the segmenter gets wrong

use std::path::Path;

use hashbrown::HashMap;

use crate::TableError;

/// Built-in overrides for known-hard headwords.
pub const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    ("䦆头", "jué tóu"),
    ("令人注目", "lìng rén zhù mù"),
    ("建安七子", "jiàn ān qī zǐ"),
];

/// Headword to verified transcription.
///
/// A headword found here is stored with exactly this transcription. It skips
/// segmentation, the word-separator split and the token checks.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding [`BUILTIN_OVERRIDES`].
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (word, pinyin) in BUILTIN_OVERRIDES {
            table.insert(*word, *pinyin);
        }
        table
    }

    /// Add or replace one override.
    pub fn insert(&mut self, word: impl Into<String>, pinyin: impl Into<String>) {
        self.entries.insert(word.into(), pinyin.into());
    }

    /// The verified transcription for `word`, if any.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `word<TAB>transcription` lines into this table.
    ///
    /// Blank lines and lines starting with `#` are skipped. Later lines win
    /// over earlier ones and over built-in entries.
    pub fn extend_from_str(&mut self, text: &str) -> Result<(), TableError> {
        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((word, pinyin)) = line.split_once('\t') else {
                return Err(TableError::OverrideParse {
                    line: index + 1,
                    reason: "expected word<TAB>transcription".to_string(),
                });
            };
            let (word, pinyin) = (word.trim(), pinyin.trim());
            if word.is_empty() || pinyin.is_empty() {
                return Err(TableError::OverrideParse {
                    line: index + 1,
                    reason: "empty word or transcription".to_string(),
                });
            }
            self.insert(word, pinyin);
        }
        Ok(())
    }

    /// Merge an override file into this table.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), TableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_str(&text)
    }
}
