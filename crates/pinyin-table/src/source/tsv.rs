// Tab-separated source: one `headword<TAB>definition` entry per line
//
// A literal `\n` in the definition stands for a newline, so multi-line
// definitions fit on one line. Blank lines are skipped.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{RawEntry, SourceError, io_error};

/// Pull iterator over a tab-separated dictionary.
pub struct TsvSource<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    failed: bool,
    path: PathBuf,
}

impl TsvSource<BufReader<std::fs::File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = std::fs::File::open(path).map_err(io_error(path))?;
        Ok(Self::with_path(BufReader::new(file), path.to_path_buf()))
    }
}

impl<R: BufRead> TsvSource<R> {
    /// Read from any buffered reader; errors name the source `<input>`.
    pub fn new(reader: R) -> Self {
        Self::with_path(reader, PathBuf::from("<input>"))
    }

    fn with_path(reader: R, path: PathBuf) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
            path,
        }
    }

    fn parse_line(&self, line: &str) -> Result<RawEntry, SourceError> {
        let Some((headword, definition)) = line.split_once('\t') else {
            return Err(SourceError::Malformed {
                line: self.line_no,
                reason: format!("{}: expected headword<TAB>definition", self.path.display()),
            });
        };
        Ok(RawEntry::new(headword, definition.replace("\\n", "\n")))
    }
}

impl<R: BufRead> Iterator for TsvSource<R> {
    type Item = Result<RawEntry, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(SourceError::Io {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };
            self.line_no += 1;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let entry = self.parse_line(line);
            if entry.is_err() {
                self.failed = true;
            }
            return Some(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_entries() {
        let text = "报告\tbào gào\\nreport\n\n头\ttóu\r\n";
        let entries: Vec<RawEntry> = TsvSource::new(text.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            entries,
            vec![
                RawEntry::new("报告", "bào gào\nreport"),
                RawEntry::new("头", "tóu"),
            ]
        );
    }

    #[test]
    fn missing_tab_stops() {
        let text = "报告\tbào gào\nbroken\n头\ttóu\n";
        let mut source = TsvSource::new(text.as_bytes());
        assert!(source.next().unwrap().is_ok());
        assert!(matches!(
            source.next(),
            Some(Err(SourceError::Malformed { line: 2, .. }))
        ));
        assert!(source.next().is_none());
    }

    #[test]
    fn read_error_keeps_io_source() {
        // Invalid UTF-8 makes `lines()` fail with `InvalidData`.
        let bytes: &[u8] = b"\xE6\x8A\xA5\tb\xFFao\n";
        let mut source = TsvSource::new(bytes);
        match source.next() {
            Some(Err(SourceError::Io { path, source: err })) => {
                assert_eq!(path, PathBuf::from("<input>"));
                assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
        assert!(source.next().is_none());
    }

    #[test]
    fn empty_definition_is_allowed() {
        let entries: Vec<RawEntry> = TsvSource::new("报\t\n".as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries, vec![RawEntry::new("报", "")]);
    }
}
