// StarDict reader: .ifo header, .idx index, plain .dict data
//
// Layout:
// - `<base>.ifo`: text header, a magic first line then `key=value` lines
// - `<base>.idx`: records of NUL-terminated UTF-8 headword, big-endian data
//   offset (32 or 64 bits, per `idxoffsetbits`) and big-endian u32 size
// - `<base>.dict`: entry data; with `sametypesequence` the type markers are
//   omitted, otherwise every field starts with its one-byte type
//
// Only the first textual field of each entry is returned as the definition.

use std::path::{Path, PathBuf};

use super::{RawEntry, SourceError, io_error};

/// First line of every `.ifo` file.
const IFO_MAGIC: &str = "StarDict's dict ifo file";

/// Parsed `.ifo` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfoHeader {
    pub version: String,
    pub book_name: String,
    pub word_count: usize,
    pub idx_file_size: u64,
    pub same_type_sequence: Option<String>,
    /// Width of `.idx` data offsets: 32 or 64.
    pub idx_offset_bits: u32,
}

/// Parse the text of an `.ifo` file.
pub fn parse_ifo(text: &str) -> Result<IfoHeader, SourceError> {
    let mut lines = text.trim_start_matches('\u{FEFF}').lines();
    if lines.next().map(str::trim_end) != Some(IFO_MAGIC) {
        return Err(SourceError::InvalidIfo("missing magic line".to_string()));
    }

    let mut version = None;
    let mut book_name = None;
    let mut word_count = None;
    let mut idx_file_size = None;
    let mut same_type_sequence = None;
    let mut idx_offset_bits = 32;

    for line in lines {
        let Some((key, value)) = line.trim_end().split_once('=') else {
            continue;
        };
        match key {
            "version" => version = Some(value.to_string()),
            "bookname" => book_name = Some(value.to_string()),
            "wordcount" => word_count = Some(parse_number(key, value)?),
            "idxfilesize" => idx_file_size = Some(parse_number(key, value)?),
            "sametypesequence" if !value.is_empty() => {
                same_type_sequence = Some(value.to_string())
            }
            "idxoffsetbits" => {
                idx_offset_bits = match parse_number(key, value)? {
                    32 => 32,
                    64 => 64,
                    bits => {
                        return Err(match u32::try_from(bits) {
                            Ok(bits) => SourceError::UnsupportedOffsetBits(bits),
                            Err(_) => {
                                SourceError::InvalidIfo(format!("{key}={value} is out of range"))
                            }
                        });
                    }
                };
            }
            _ => {}
        }
    }

    Ok(IfoHeader {
        version: version.ok_or(SourceError::MissingIfoKey("version"))?,
        book_name: book_name.unwrap_or_default(),
        word_count: word_count.ok_or(SourceError::MissingIfoKey("wordcount"))? as usize,
        idx_file_size: idx_file_size.ok_or(SourceError::MissingIfoKey("idxfilesize"))?,
        same_type_sequence,
        idx_offset_bits,
    })
}

fn parse_number(key: &str, value: &str) -> Result<u64, SourceError> {
    value
        .trim()
        .parse()
        .map_err(|_| SourceError::InvalidIfo(format!("{key}={value} is not a number")))
}

// ---------------------------------------------------------------------------
// Data fields
// ---------------------------------------------------------------------------

/// Extract the first lowercase (text) field from one entry's data.
///
/// Returns `None` when the entry has no text field.
pub fn first_text_field<'a>(data: &'a [u8], same_type_sequence: Option<&str>) -> Option<&'a [u8]> {
    match same_type_sequence {
        Some(types) => {
            let types = types.as_bytes();
            let mut rest = data;
            for (i, &ty) in types.iter().enumerate() {
                let last = i + 1 == types.len();
                let (field, tail) = take_field(rest, ty, last)?;
                if ty.is_ascii_lowercase() {
                    return Some(field);
                }
                rest = tail;
            }
            None
        }
        None => {
            let mut rest = data;
            while let Some((&ty, tail)) = rest.split_first() {
                let (field, tail) = take_field(tail, ty, false)?;
                if ty.is_ascii_lowercase() {
                    return Some(field);
                }
                rest = tail;
            }
            None
        }
    }
}

/// Split one field of type `ty` off the front of `data`.
///
/// Lowercase types are NUL-terminated text, uppercase types carry a
/// big-endian u32 size. The last field of a `sametypesequence` entry has
/// neither and runs to the end.
fn take_field(data: &[u8], ty: u8, last: bool) -> Option<(&[u8], &[u8])> {
    if last {
        return Some((data, &[]));
    }
    if ty.is_ascii_lowercase() {
        match data.iter().position(|&b| b == 0) {
            Some(end) => Some((&data[..end], &data[end + 1..])),
            None => Some((data, &[])),
        }
    } else {
        let size = u32::from_be_bytes(data.get(..4)?.try_into().ok()?) as usize;
        let end = 4usize.checked_add(size)?;
        Some((data.get(4..end)?, &data[end..]))
    }
}

// ---------------------------------------------------------------------------
// StarDictReader
// ---------------------------------------------------------------------------

/// Pull iterator over a StarDict dictionary.
///
/// The index and data files are read into memory on open.
pub struct StarDictReader {
    header: IfoHeader,
    dict_path: PathBuf,
    index: Vec<u8>,
    data: Vec<u8>,
    pos: usize,
    failed: bool,
}

impl StarDictReader {
    /// Open a dictionary from its base path (`data/name`) or its `.ifo` path.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let base = base_path(path);
        let ifo_path = with_suffix(&base, "ifo");
        let idx_path = with_suffix(&base, "idx");
        let dict_path = with_suffix(&base, "dict");

        let ifo = std::fs::read_to_string(&ifo_path).map_err(io_error(&ifo_path))?;
        let header = parse_ifo(&ifo)?;

        if !dict_path.is_file() {
            let dz_path = with_suffix(&base, "dict.dz");
            if dz_path.is_file() {
                return Err(SourceError::Compressed(dz_path));
            }
        }

        let index = std::fs::read(&idx_path).map_err(io_error(&idx_path))?;
        let data = std::fs::read(&dict_path).map_err(io_error(&dict_path))?;
        if index.len() as u64 != header.idx_file_size {
            tracing::warn!(
                path = %idx_path.display(),
                expected = header.idx_file_size,
                actual = index.len(),
                "idx size differs from header"
            );
        }

        tracing::info!(
            book = %header.book_name,
            words = header.word_count,
            "opened StarDict dictionary"
        );
        Ok(Self::from_parts(header, dict_path, index, data))
    }

    /// Build a reader over in-memory index and data.
    pub fn from_parts(header: IfoHeader, dict_path: PathBuf, index: Vec<u8>, data: Vec<u8>) -> Self {
        Self {
            header,
            dict_path,
            index,
            data,
            pos: 0,
            failed: false,
        }
    }

    pub fn header(&self) -> &IfoHeader {
        &self.header
    }

    /// Path of the `.dict` data file, also the default corpus.
    pub fn dict_path(&self) -> &Path {
        &self.dict_path
    }

    fn read_record(&mut self) -> Result<RawEntry, SourceError> {
        let start = self.pos;
        let index = &self.index[start..];
        let nul = index
            .iter()
            .position(|&b| b == 0)
            .ok_or(SourceError::TruncatedIndex(start))?;
        let headword = std::str::from_utf8(&index[..nul])
            .map_err(|_| SourceError::InvalidUtf8(format!(".idx headword at byte {start}")))?
            .to_string();

        let offset_len = (self.header.idx_offset_bits / 8) as usize;
        let fields = index
            .get(nul + 1..nul + 1 + offset_len + 4)
            .ok_or(SourceError::TruncatedIndex(start))?;
        let offset = fields[..offset_len]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        let size = u32::from_be_bytes([
            fields[offset_len],
            fields[offset_len + 1],
            fields[offset_len + 2],
            fields[offset_len + 3],
        ]);
        self.pos = start + nul + 1 + offset_len + 4;

        let range = usize::try_from(offset)
            .ok()
            .and_then(|o| Some(o..o.checked_add(size as usize)?))
            .filter(|r| r.end <= self.data.len());
        let Some(range) = range else {
            return Err(SourceError::DataOutOfRange {
                headword,
                offset,
                size,
            });
        };

        let entry_data = &self.data[range];
        let definition = match first_text_field(entry_data, self.header.same_type_sequence.as_deref()) {
            Some(text) => std::str::from_utf8(text)
                .map_err(|_| SourceError::InvalidUtf8(format!("definition of {headword:?}")))?
                .to_string(),
            None => {
                tracing::warn!(headword = %headword, "entry has no text field");
                String::new()
            }
        };

        Ok(RawEntry {
            headword,
            definition,
        })
    }
}

impl Iterator for StarDictReader {
    type Item = Result<RawEntry, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.index.len() {
            return None;
        }
        let record = self.read_record();
        if record.is_err() {
            self.failed = true;
        }
        Some(record)
    }
}

/// The `.dict` data file of the dictionary at `path` (base, `.ifo`, `.idx`
/// or `.dict` path).
pub fn data_path(path: &Path) -> PathBuf {
    with_suffix(&base_path(path), "dict")
}

/// Strip a trailing `.ifo` / `.idx` / `.dict` extension.
fn base_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ifo") | Some("idx") | Some("dict") => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

/// Append `.ext` without replacing an existing dotted part of the name.
fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
