// Output record: one word with its pinyin and frequency annotations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::{char_count, token_count};

/// Field separator of the record format.
pub const FIELD_SEPARATOR: char = '|';

/// Separator between per-character corpus counts.
pub const FREQUENCY_SEPARATOR: char = ',';

/// Error parsing a record line back into an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("expected 4 fields separated by '|', got {0}")]
    FieldCount(usize),
    #[error("invalid frequency value {0:?}")]
    InvalidFrequency(String),
    #[error("invalid pinyin frequency {0:?}")]
    InvalidPinyinFrequency(String),
}

/// A final table entry.
///
/// `frequency` has one corpus occurrence count per character of `word`.
/// `pinyin_frequency` is the zero-based occurrence count of the winning
/// reading for single-character entries, 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub word: String,
    pub pinyin: String,
    pub frequency: Vec<u64>,
    pub pinyin_frequency: u32,
}

impl Entry {
    /// Create a new entry.
    pub fn new(
        word: impl Into<String>,
        pinyin: impl Into<String>,
        frequency: Vec<u64>,
        pinyin_frequency: u32,
    ) -> Self {
        Self {
            word: word.into(),
            pinyin: pinyin.into(),
            frequency,
            pinyin_frequency,
        }
    }

    /// Whether the word has exactly one pinyin token per character.
    pub fn is_aligned(&self) -> bool {
        char_count(&self.word) == token_count(&self.pinyin)
    }

    /// Render the entry as one `word|pinyin|f1,f2,...|pinyinFrequency` line,
    /// without a trailing newline.
    ///
    /// No escaping is done; words and pinyin never contain `|` or newlines.
    pub fn to_record(&self) -> String {
        self.to_string()
    }

    /// Parse a record line produced by [`Entry::to_record`].
    pub fn from_record(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let [word, pinyin, frequency, pinyin_frequency] = fields[..] else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        let frequency = if frequency.is_empty() {
            Vec::new()
        } else {
            frequency
                .split(FREQUENCY_SEPARATOR)
                .map(|f| {
                    f.parse::<u64>()
                        .map_err(|_| RecordError::InvalidFrequency(f.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        let pinyin_frequency = pinyin_frequency
            .parse::<u32>()
            .map_err(|_| RecordError::InvalidPinyinFrequency(pinyin_frequency.to_string()))?;

        Ok(Self::new(word, pinyin, frequency, pinyin_frequency))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}", self.word, self.pinyin)?;
        for (i, count) in self.frequency.iter().enumerate() {
            if i > 0 {
                write!(f, "{FREQUENCY_SEPARATOR}")?;
            }
            write!(f, "{count}")?;
        }
        write!(f, "{FIELD_SEPARATOR}{}", self.pinyin_frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_two_characters() {
        let e = Entry::new("报告", "bào gào", vec![1, 1], 0);
        assert_eq!(e.to_record(), "报告|bào gào|1,1|0");
    }

    #[test]
    fn record_single_character() {
        let e = Entry::new("报", "bào", vec![12], 3);
        assert_eq!(e.to_record(), "报|bào|12|3");
    }

    #[test]
    fn parse_record() {
        let e = Entry::from_record("报告|bào gào|1,1|0").unwrap();
        assert_eq!(e, Entry::new("报告", "bào gào", vec![1, 1], 0));
    }

    #[test]
    fn parse_rejects_field_count() {
        assert_eq!(
            Entry::from_record("报|bào|1"),
            Err(RecordError::FieldCount(3))
        );
    }

    #[test]
    fn parse_rejects_bad_frequency() {
        assert_eq!(
            Entry::from_record("报|bào|x|0"),
            Err(RecordError::InvalidFrequency("x".to_string()))
        );
        assert!(matches!(
            Entry::from_record("报|bào|1|-1"),
            Err(RecordError::InvalidPinyinFrequency(_))
        ));
    }

    #[test]
    fn aligned_entries() {
        assert!(Entry::new("报告", "bào gào", vec![0, 0], 0).is_aligned());
        assert!(!Entry::new("报告", "bào", vec![0, 0], 0).is_aligned());
    }

    #[test]
    fn json_uses_camel_case() {
        let e = Entry::new("告", "gào", vec![1], 0);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r#"{"word":"告","pinyin":"gào","frequency":[1],"pinyinFrequency":0}"#
        );
    }
}
