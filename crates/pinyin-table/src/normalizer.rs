// Noise stripping for raw dictionary headwords and transcriptions
//
// The source dictionary mixes annotations into both fields: year ranges and
// glosses in parentheses, decorative punctuation, alternate readings after a
// slash, and a handful of characters written in place of their pinyin. These
// rules are tied to that data and are applied before segmentation.

use std::sync::LazyLock;

use regex::Regex;

/// Parenthesised span, ASCII or full-width, with one optional leading space.
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?(?:\(|（).*?(?:\)|）)").expect("valid regex"));

/// Decorative punctuation runs.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!（）ㄍ'“”《》{}…\-?]+").expect("valid regex"));

/// Whitespace runs, including `|`, no-break space and ideographic space.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[ \t\n\x0B\x0C\r|\u{00A0}\u{3000}]+").expect("valid regex")
});

/// An alternate reading: a slash up to and including the next space, middle
/// dot, newline, or the end of the text.
static HETERONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/.*?(?: |$|\n|·)").expect("valid regex"));

/// Literal replacements applied in order to the lowercased transcription.
///
/// Covers one legacy digit-tone spelling and characters that the source
/// writes instead of their reading.
pub const LEGACY_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("gu3", " gǔ "),
    ("金屚", " lòu "),
    ("宬", " chéng "),
    ("䁖", " lōu "),
    ("璁", "cōng"),
    ("〇", " líng "),
    ("○", " líng "),
    ("龟", " guī "),
    ("\u{0261}", "g"), // LATIN SMALL LETTER SCRIPT G
];

// ---------------------------------------------------------------------------
// Normalizer trait
// ---------------------------------------------------------------------------

/// A cleaned (word, transcription) pair, ready for override lookup and
/// segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub word: String,
    pub transcription: String,
}

/// Turns a raw headword and definition into a cleaned pair.
pub trait Normalizer {
    fn normalize(&self, headword: &str, definition: &str) -> Normalized;
}

/// Normalizer for the bundled dictionary's annotation conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryNormalizer;

impl Normalizer for DictionaryNormalizer {
    fn normalize(&self, headword: &str, definition: &str) -> Normalized {
        Normalized {
            word: normalize_headword(headword),
            transcription: normalize_transcription(first_line(definition)),
        }
    }
}

/// Normalizer for pre-cleaned sources: takes the headword and the first
/// definition line as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimNormalizer;

impl Normalizer for VerbatimNormalizer {
    fn normalize(&self, headword: &str, definition: &str) -> Normalized {
        Normalized {
            word: headword.to_string(),
            transcription: first_line(definition).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// The first line of a definition holds the transcription.
pub fn first_line(definition: &str) -> &str {
    definition.split('\n').next().unwrap_or_default()
}

/// Strip parenthesised spans, punctuation and all whitespace from a headword.
pub fn normalize_headword(raw: &str) -> String {
    let word = PARENTHESIZED.replace_all(raw, "");
    let word = PUNCTUATION.replace_all(&word, "");
    WHITESPACE.replace_all(&word, "").into_owned()
}

/// Clean one raw transcription line.
///
/// Lowercases, applies [`LEGACY_SUBSTITUTIONS`], drops parenthesised spans,
/// turns punctuation into boundaries, drops alternate readings, then
/// collapses whitespace and trims.
pub fn normalize_transcription(raw: &str) -> String {
    let mut pinyin = raw.to_lowercase();
    for (from, to) in LEGACY_SUBSTITUTIONS {
        if pinyin.contains(from) {
            pinyin = pinyin.replace(from, to);
        }
    }
    let pinyin = PARENTHESIZED.replace_all(&pinyin, "");
    let pinyin = PUNCTUATION.replace_all(&pinyin, " ");
    let pinyin = HETERONYM.replace_all(&pinyin, "");
    let pinyin = collapse_whitespace(&pinyin);
    trim_control(&pinyin).to_string()
}

/// Replace every whitespace run with a single space. Does not trim.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").into_owned()
}

/// Trim spaces and control characters from both ends.
fn trim_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}
