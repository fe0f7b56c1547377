// Character occurrence counts from a reference text

use std::io::BufRead;
use std::path::Path;

use hashbrown::HashMap;
use pinyin_core::character::simple_lower;

use crate::TableError;

/// Code point to occurrence count, case-insensitive.
///
/// Every character of every line counts once per occurrence; line terminators
/// do not count. A character never seen has count 0.
#[derive(Debug, Clone, Default)]
pub struct CorpusCounter {
    counts: HashMap<char, u64>,
}

impl CorpusCounter {
    /// An empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every line of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counter = Self::new();
        for line in text.lines() {
            counter.add_line(line);
        }
        counter
    }

    /// Count every line read from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut counter = Self::new();
        for line in reader.lines() {
            counter.add_line(&line?);
        }
        Ok(counter)
    }

    /// Count a UTF-8 text file. Any read failure is fatal for the run.
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let io_err = |source| TableError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(io_err)?;
        let counter = Self::from_reader(std::io::BufReader::new(file)).map_err(io_err)?;
        tracing::info!(
            path = %path.display(),
            distinct = counter.distinct(),
            "corpus counted"
        );
        Ok(counter)
    }

    /// Count the characters of one line.
    pub fn add_line(&mut self, line: &str) {
        for c in line.chars() {
            *self.counts.entry(simple_lower(c)).or_insert(0) += 1;
        }
    }

    /// Occurrences of `c`, ignoring case.
    pub fn count(&self, c: char) -> u64 {
        self.counts.get(&simple_lower(c)).copied().unwrap_or(0)
    }

    /// One count per character of `word`, in order.
    pub fn frequencies(&self, word: &str) -> Vec<u64> {
        word.chars().map(|c| self.count(c)).collect()
    }

    /// Number of distinct characters seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_occurrence_counts_one() {
        let counter = CorpusCounter::from_text("报告");
        assert_eq!(counter.count('报'), 1);
        assert_eq!(counter.count('告'), 1);
        assert_eq!(counter.frequencies("报告"), vec![1, 1]);
    }

    #[test]
    fn unseen_counts_zero() {
        let counter = CorpusCounter::from_text("报告");
        assert_eq!(counter.count('头'), 0);
        assert_eq!(counter.frequencies("头报"), vec![0, 1]);
    }

    #[test]
    fn repeats_across_lines() {
        let counter = CorpusCounter::from_text("报告\n报纸\r\n报");
        assert_eq!(counter.count('报'), 3);
        assert_eq!(counter.count('\n'), 0);
        assert_eq!(counter.count('\r'), 0);
    }

    #[test]
    fn case_insensitive() {
        let counter = CorpusCounter::from_text("Aa");
        assert_eq!(counter.count('a'), 2);
        assert_eq!(counter.count('A'), 2);
        assert_eq!(counter.distinct(), 1);
    }

    #[test]
    fn from_reader_matches_from_text() {
        let text = "一二\n二三\n";
        let a = CorpusCounter::from_reader(text.as_bytes()).unwrap();
        let b = CorpusCounter::from_text(text);
        assert_eq!(a.frequencies("一二三"), b.frequencies("一二三"));
        assert_eq!(a.frequencies("一二三"), vec![1, 2, 1]);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = CorpusCounter::from_file(Path::new("/nonexistent/corpus.txt")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
